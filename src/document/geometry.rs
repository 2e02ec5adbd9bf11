use kurbo::{BezPath, Circle, Ellipse, Line, Point, Rect, Shape};

use crate::document::tree::{NodeId, SvgDocument};
use crate::foundation::core::{parse_number, parse_points};

const ACCURACY: f64 = 1e-3;

/// Tags that carry drawable geometry with a measurable outline.
pub const GEOMETRY_TAGS: [&str; 7] = [
    "path", "line", "polyline", "polygon", "rect", "circle", "ellipse",
];

/// Tags searched for an arrow shaft below a non-geometric first child.
pub const SHAFT_TAGS: [&str; 4] = ["path", "line", "polyline", "polygon"];

/// Whether `id` is one of the geometry elements.
pub fn is_geometry(doc: &SvgDocument, id: NodeId) -> bool {
    doc.tag(id).is_some_and(|t| GEOMETRY_TAGS.contains(&t))
}

/// Outline of a geometry element in its own user space.
pub fn outline(doc: &SvgDocument, id: NodeId) -> Option<BezPath> {
    let num = |name: &str| doc.attr(id, name).and_then(parse_number);
    let num0 = |name: &str| num(name).unwrap_or(0.0);

    let path = match doc.tag(id)? {
        "path" => BezPath::from_svg(doc.attr(id, "d")?).ok()?,
        "line" => Line::new(
            Point::new(num0("x1"), num0("y1")),
            Point::new(num0("x2"), num0("y2")),
        )
        .to_path(ACCURACY),
        "polyline" | "polygon" => {
            let pts = parse_points(doc.attr(id, "points")?);
            let (first, rest) = pts.split_first()?;
            let mut p = BezPath::new();
            p.move_to(*first);
            for pt in rest {
                p.line_to(*pt);
            }
            if doc.tag(id) == Some("polygon") {
                p.close_path();
            }
            p
        }
        "rect" => {
            let (w, h) = (num("width")?, num("height")?);
            Rect::new(num0("x"), num0("y"), num0("x") + w, num0("y") + h).to_path(ACCURACY)
        }
        "circle" => Circle::new(Point::new(num0("cx"), num0("cy")), num("r")?).to_path(ACCURACY),
        "ellipse" => Ellipse::new(
            Point::new(num0("cx"), num0("cy")),
            (num("rx")?, num("ry")?),
            0.0,
        )
        .to_path(ACCURACY),
        _ => return None,
    };
    Some(path)
}

/// Total outline length, `None` for elements without measurable geometry.
pub fn total_length(doc: &SvgDocument, id: NodeId) -> Option<f64> {
    let path = outline(doc, id)?;
    if path.elements().is_empty() {
        return None;
    }
    let len = path.perimeter(ACCURACY);
    len.is_finite().then_some(len)
}

/// Untransformed bounds of an element: its outline, its text anchor, or the union of its
/// children.
pub fn bounding_box(doc: &SvgDocument, id: NodeId) -> Option<Rect> {
    if let Some(path) = outline(doc, id) {
        return Some(path.bounding_box());
    }
    if doc.is_text_element(id) {
        let x = doc.attr(id, "x").and_then(parse_number).unwrap_or(0.0);
        let y = doc.attr(id, "y").and_then(parse_number).unwrap_or(0.0);
        return Some(Rect::new(x, y, x, y));
    }
    doc.element_children(id)
        .filter_map(|c| bounding_box(doc, c))
        .reduce(|a, b| a.union(b))
}

/// First shaft-capable element for an arrow group's first child: the child itself when it is
/// geometry, else its first path/line/polyline/polygon descendant.
pub fn arrow_shaft(doc: &SvgDocument, first_child: NodeId) -> Option<NodeId> {
    if is_geometry(doc, first_child) {
        return Some(first_child);
    }
    doc.descendants(first_child)
        .into_iter()
        .find(|n| doc.tag(*n).is_some_and(|t| SHAFT_TAGS.contains(&t)))
}

#[cfg(test)]
#[path = "../../tests/unit/document/geometry.rs"]
mod tests;
