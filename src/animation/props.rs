use std::collections::BTreeMap;

use crate::animation::value::{Prop, Value};
use crate::foundation::error::SvgStepError;

/// Ordered property → target value mapping consumed by `set`, `show` and tweens.
///
/// Deserializes from a JSON object keyed by property name. The pseudo-property `autoAlpha`
/// expands into `opacity` plus `visibility` (`hidden` exactly when the alpha is zero).
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(try_from = "BTreeMap<String, serde_json::Value>")]
pub struct PropertyMap {
    entries: Vec<(Prop, Value)>,
}

impl PropertyMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `prop` to `value`, replacing any earlier value for it.
    pub fn with(mut self, prop: Prop, value: impl Into<Value>) -> Self {
        self.insert(prop, value.into());
        self
    }

    /// Opacity plus matching visibility.
    pub fn auto_alpha(self, alpha: f64) -> Self {
        let vis = if alpha <= 0.0 { "hidden" } else { "visible" };
        self.with(Prop::Opacity, alpha)
            .with(Prop::Visibility, Value::Keyword(vis.to_owned()))
    }

    /// Opacity only.
    pub fn opacity(self, alpha: f64) -> Self {
        self.with(Prop::Opacity, alpha)
    }

    /// Fill paint, parsed from hex or kept as a keyword.
    pub fn fill(self, paint: &str) -> Self {
        self.with(Prop::Fill, Value::parse_for(Prop::Fill, paint))
    }

    /// Translation.
    pub fn translate(self, x: f64, y: f64) -> Self {
        self.with(Prop::X, x).with(Prop::Y, y)
    }

    /// Uniform scale.
    pub fn scale(self, factor: f64) -> Self {
        self.with(Prop::Scale, factor)
    }

    /// Insert or replace one entry.
    pub fn insert(&mut self, prop: Prop, value: Value) {
        match self.entries.iter_mut().find(|(p, _)| *p == prop) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((prop, value)),
        }
    }

    /// Value set for `prop`, if any.
    pub fn get(&self, prop: Prop) -> Option<&Value> {
        self.entries.iter().find(|(p, _)| *p == prop).map(|(_, v)| v)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Prop, &Value)> {
        self.entries.iter().map(|(p, v)| (*p, v))
    }

    /// Mutable access to values, used when resolving named colors.
    pub fn values_mut(&mut self) -> impl Iterator<Item = (Prop, &mut Value)> {
        self.entries.iter_mut().map(|(p, v)| (*p, v))
    }

    /// Properties present in this map.
    pub fn props(&self) -> impl Iterator<Item = Prop> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<BTreeMap<String, serde_json::Value>> for PropertyMap {
    type Error = SvgStepError;

    fn try_from(raw: BTreeMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut out = PropertyMap::new();
        for (key, value) in raw {
            if key == "autoAlpha" {
                let alpha = value.as_f64().ok_or_else(|| {
                    SvgStepError::serde(format!("autoAlpha must be a number, got {value}"))
                })?;
                out = out.auto_alpha(alpha);
                continue;
            }

            let prop = Prop::from_name(&key)
                .ok_or_else(|| SvgStepError::serde(format!("unknown property '{key}'")))?;
            let v = match &value {
                serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
                serde_json::Value::String(s) => Value::parse_for(prop, s),
                other => {
                    return Err(SvgStepError::serde(format!(
                        "property '{key}' must be a number or string, got {other}"
                    )));
                }
            };
            out.insert(prop, v);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/props.rs"]
mod tests;
