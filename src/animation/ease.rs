use std::fmt;
use std::str::FromStr;

use crate::foundation::error::SvgStepError;

/// Easing curve applied to a tween's normalized progress.
///
/// Curves are named the way diagram scripts write them: `none`, `power2.out`, `sine.inOut`,
/// `back.out(1.7)`. A bare family name (`power3`) means its `out` variant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// `t^(n+1)`.
    PowerIn(u8),
    /// `1 - (1-t)^(n+1)`.
    PowerOut(u8),
    /// Symmetric power curve.
    PowerInOut(u8),
    /// Quarter-sine acceleration.
    SineIn,
    /// Quarter-sine deceleration.
    SineOut,
    /// Half-cosine ease.
    SineInOut,
    /// Pull back before moving (overshoot parameter).
    BackIn(f64),
    /// Overshoot the target, then settle (overshoot parameter).
    BackOut(f64),
    /// Pull back, overshoot, settle.
    BackInOut(f64),
}

const DEFAULT_OVERSHOOT: f64 = 1.70158;

impl Default for Ease {
    fn default() -> Self {
        Self::PowerOut(1)
    }
}

impl Ease {
    /// Map progress `t` in `[0, 1]` to eased progress. Back curves may leave `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::PowerIn(n) => t.powi(i32::from(n) + 1),
            Self::PowerOut(n) => 1.0 - (1.0 - t).powi(i32::from(n) + 1),
            Self::PowerInOut(n) => {
                let p = i32::from(n) + 1;
                if t < 0.5 {
                    (2.0 * t).powi(p) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(p) / 2.0
                }
            }
            Self::SineIn => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Self::SineOut => (t * std::f64::consts::FRAC_PI_2).sin(),
            Self::SineInOut => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::BackIn(s) => back_in(t, s),
            Self::BackOut(s) => 1.0 - back_in(1.0 - t, s),
            Self::BackInOut(s) => {
                if t < 0.5 {
                    back_in(2.0 * t, s) / 2.0
                } else {
                    1.0 - back_in(2.0 * (1.0 - t), s) / 2.0
                }
            }
        }
    }
}

fn back_in(t: f64, s: f64) -> f64 {
    (s + 1.0) * t * t * t - s * t * t
}

impl FromStr for Ease {
    type Err = SvgStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (family, rest) = s.split_once('.').unwrap_or((s, "out"));
        let (variant, param) = match rest.split_once('(') {
            Some((v, p)) => {
                let p = p
                    .strip_suffix(')')
                    .ok_or_else(|| SvgStepError::parse(format!("unterminated ease '{s}'")))?;
                let p: f64 = p
                    .trim()
                    .parse()
                    .map_err(|_| SvgStepError::parse(format!("invalid ease parameter in '{s}'")))?;
                (v, Some(p))
            }
            None => (rest, None),
        };

        let power = match family {
            "none" | "linear" => return Ok(Self::Linear),
            "power0" => return Ok(Self::Linear),
            "power1" | "quad" => Some(1),
            "power2" | "cubic" => Some(2),
            "power3" | "quart" => Some(3),
            "power4" | "quint" | "strong" => Some(4),
            _ => None,
        };

        let ease = match (family, power, variant) {
            (_, Some(n), "in") => Self::PowerIn(n),
            (_, Some(n), "out") => Self::PowerOut(n),
            (_, Some(n), "inOut") => Self::PowerInOut(n),
            ("sine", None, "in") => Self::SineIn,
            ("sine", None, "out") => Self::SineOut,
            ("sine", None, "inOut") => Self::SineInOut,
            ("back", None, "in") => Self::BackIn(param.unwrap_or(DEFAULT_OVERSHOOT)),
            ("back", None, "out") => Self::BackOut(param.unwrap_or(DEFAULT_OVERSHOOT)),
            ("back", None, "inOut") => Self::BackInOut(param.unwrap_or(DEFAULT_OVERSHOOT)),
            _ => return Err(SvgStepError::parse(format!("unknown ease '{s}'"))),
        };
        Ok(ease)
    }
}

impl TryFrom<String> for Ease {
    type Error = SvgStepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "none"),
            Self::PowerIn(n) => write!(f, "power{n}.in"),
            Self::PowerOut(n) => write!(f, "power{n}.out"),
            Self::PowerInOut(n) => write!(f, "power{n}.inOut"),
            Self::SineIn => write!(f, "sine.in"),
            Self::SineOut => write!(f, "sine.out"),
            Self::SineInOut => write!(f, "sine.inOut"),
            Self::BackIn(s) => write!(f, "back.in({s})"),
            Self::BackOut(s) => write!(f, "back.out({s})"),
            Self::BackInOut(s) => write!(f, "back.inOut({s})"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
