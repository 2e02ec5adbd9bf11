pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Seconds on a timeline.
pub type Secs = f64;

/// Tolerance used when comparing timeline positions.
pub(crate) const TIME_EPSILON: f64 = 1e-9;

/// Direction an element slides in from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideFrom {
    /// Enter from the left edge.
    #[default]
    Left,
    /// Enter from the right edge.
    Right,
    /// Enter from above.
    Top,
    /// Enter from below.
    Bottom,
}

impl SlideFrom {
    /// Starting offset for an element sliding in from this side over `distance` units.
    pub fn offset(self, distance: f64) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-distance, 0.0),
            Self::Right => Vec2::new(distance, 0.0),
            Self::Top => Vec2::new(0.0, -distance),
            Self::Bottom => Vec2::new(0.0, distance),
        }
    }
}

/// Parse an SVG length/number attribute, tolerating a trailing `px` unit.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s).trim();
    let v: f64 = s.parse().ok()?;
    v.is_finite().then_some(v)
}

/// Parse an SVG `points` list (`"x1,y1 x2,y2 ..."`).
pub(crate) fn parse_points(s: &str) -> Vec<Point> {
    let nums: Vec<f64> = s
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|t| !t.is_empty())
        .filter_map(parse_number)
        .collect();
    nums.chunks_exact(2)
        .map(|xy| Point::new(xy[0], xy[1]))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
