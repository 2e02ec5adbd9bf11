use std::fmt;

use crate::foundation::core::parse_number;
use crate::foundation::math::lerp;

/// An animatable presentation property of an SVG element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Prop {
    /// `opacity`, 0..1.
    Opacity,
    /// `visibility`, `visible` or `hidden`.
    Visibility,
    /// Horizontal translation in user units.
    X,
    /// Vertical translation in user units.
    Y,
    /// Uniform scale about the element centre.
    Scale,
    /// `fill` paint.
    Fill,
    /// `stroke` paint.
    Stroke,
    /// `stroke-dasharray`.
    StrokeDasharray,
    /// `stroke-dashoffset`.
    StrokeDashoffset,
}

impl Prop {
    /// Every property, in serialization order.
    pub const ALL: [Prop; 9] = [
        Prop::Opacity,
        Prop::Visibility,
        Prop::X,
        Prop::Y,
        Prop::Scale,
        Prop::Fill,
        Prop::Stroke,
        Prop::StrokeDasharray,
        Prop::StrokeDashoffset,
    ];

    /// Accept both script (`strokeDashoffset`) and attribute (`stroke-dashoffset`) spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        let p = match name {
            "opacity" => Self::Opacity,
            "visibility" => Self::Visibility,
            "x" => Self::X,
            "y" => Self::Y,
            "scale" => Self::Scale,
            "fill" => Self::Fill,
            "stroke" => Self::Stroke,
            "strokeDasharray" | "stroke-dasharray" => Self::StrokeDasharray,
            "strokeDashoffset" | "stroke-dashoffset" => Self::StrokeDashoffset,
            _ => return None,
        };
        Some(p)
    }

    /// SVG attribute that carries this property, if it maps onto one directly.
    pub fn attr_name(self) -> Option<&'static str> {
        match self {
            Self::Opacity => Some("opacity"),
            Self::Visibility => Some("visibility"),
            Self::Fill => Some("fill"),
            Self::Stroke => Some("stroke"),
            Self::StrokeDasharray => Some("stroke-dasharray"),
            Self::StrokeDashoffset => Some("stroke-dashoffset"),
            Self::X | Self::Y | Self::Scale => None,
        }
    }

    /// Value an element has when neither the animation nor its markup set the property.
    pub fn default_value(self) -> Value {
        match self {
            Self::Opacity | Self::Scale => Value::Number(1.0),
            Self::X | Self::Y | Self::StrokeDashoffset => Value::Number(0.0),
            Self::Visibility => Value::Keyword("visible".to_owned()),
            Self::Fill => Value::Color(Color::BLACK),
            Self::Stroke | Self::StrokeDasharray => Value::Keyword("none".to_owned()),
        }
    }

    pub(crate) fn is_paint(self) -> bool {
        matches!(self, Self::Fill | Self::Stroke)
    }
}

/// Straight-alpha RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    /// Build a color from normalized components.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (case-insensitive).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.trim().strip_prefix('#')?;
        if !s.is_ascii() {
            return None;
        }
        let byte = |pair: &str| u8::from_str_radix(pair, 16).ok();
        let (r, g, b, a) = match s.len() {
            3 => {
                let nib = |i: usize| byte(&s[i..=i]).map(|v| v * 17);
                (nib(0)?, nib(1)?, nib(2)?, 255)
            }
            6 => (byte(&s[0..2])?, byte(&s[2..4])?, byte(&s[4..6])?, 255),
            8 => (
                byte(&s[0..2])?,
                byte(&s[2..4])?,
                byte(&s[4..6])?,
                byte(&s[6..8])?,
            ),
            _ => return None,
        };
        Some(Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        ))
    }

    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self::rgba(
            lerp(a.r, b.r, t),
            lerp(a.g, b.g, t),
            lerp(a.b, b.b, t),
            lerp(a.a, b.a, t),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        write!(f, "#{:02x}{:02x}{:02x}", to_u8(self.r), to_u8(self.g), to_u8(self.b))?;
        if self.a < 1.0 {
            write!(f, "{:02x}", to_u8(self.a))?;
        }
        Ok(())
    }
}

/// A property value: numeric, color, or a keyword that can only be switched.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Numeric value.
    Number(f64),
    /// Color paint.
    Color(Color),
    /// Non-interpolable keyword (`hidden`, `none`, `url(#g)`).
    Keyword(String),
}

impl Value {
    /// Parse attribute/script text into the value shape appropriate for `prop`.
    pub fn parse_for(prop: Prop, text: &str) -> Self {
        if prop.is_paint() {
            if let Some(c) = Color::parse_hex(text) {
                return Self::Color(c);
            }
            return Self::Keyword(text.trim().to_owned());
        }
        match parse_number(text) {
            Some(v) => Self::Number(v),
            None => Self::Keyword(text.trim().to_owned()),
        }
    }

    /// Numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Keyword text, if this is a keyword.
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(k) => Some(k),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", format_number(*v)),
            Self::Color(c) => write!(f, "{c}"),
            Self::Keyword(k) => f.write_str(k),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

/// Shortest decimal form without float noise (`0.5`, `12`, `0.3333`).
pub(crate) fn format_number(v: f64) -> String {
    let rounded = (v * 10_000.0).round() / 10_000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// Interpolate `prop` between two values at eased ratio `t`.
///
/// Numbers and colors blend; keywords switch at the end of the tween, except visibility, which
/// becomes `visible` as soon as the tween leaves its start so that fading elements are seen.
pub fn interpolate(prop: Prop, from: &Value, to: &Value, t: f64) -> Value {
    match (from, to) {
        (Value::Number(a), Value::Number(b)) => Value::Number(lerp(*a, *b, t)),
        (Value::Color(a), Value::Color(b)) => Value::Color(Color::lerp(a, b, t.clamp(0.0, 1.0))),
        _ if t <= 0.0 => from.clone(),
        _ if t >= 1.0 => to.clone(),
        _ if prop == Prop::Visibility && to.as_keyword() == Some("visible") => to.clone(),
        _ => from.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
