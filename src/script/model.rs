use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use kurbo::Point;

use crate::animation::ease::Ease;
use crate::animation::props::PropertyMap;
use crate::animation::value::{Color, Value};
use crate::foundation::core::{Secs, SlideFrom};
use crate::foundation::error::{SvgStepError, SvgStepResult};
use crate::script::palette::{Durations, Palette};

/// Seconds, either literal or by name (`"fast"`, or a name from the script's `durations`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum DurationRef {
    /// Literal seconds.
    Secs(Secs),
    /// Named duration.
    Named(String),
}

/// Timing overrides accepted by animated steps.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct StepOptions {
    /// Overrides the operation's duration.
    pub duration: Option<DurationRef>,
    /// Seconds before the operation starts.
    pub delay: Option<DurationRef>,
    /// Overrides the operation's ease.
    pub ease: Option<Ease>,
    /// Seconds between consecutive targets.
    pub stagger: Option<Secs>,
}

/// One instruction of a sequence script.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Apply properties immediately.
    Set {
        /// Selector.
        target: String,
        /// Properties; paint values may name palette colors.
        props: PropertyMap,
    },
    /// Hide several selectors immediately.
    Hide {
        /// Selectors.
        targets: Vec<String>,
    },
    /// Replace text immediately.
    SetText {
        /// Selector.
        target: String,
        /// New text.
        text: String,
    },
    /// Reversible near-instant property change over targets and descendants.
    Show {
        /// Selector.
        target: String,
        /// Properties; paint values may name palette colors.
        #[serde(default)]
        props: PropertyMap,
    },
    /// Fade in from transparent.
    FadeIn {
        /// Selector.
        target: String,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
    /// Fade out.
    FadeOut {
        /// Selector.
        target: String,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
    /// Uniform scale about the centre.
    Scale {
        /// Selector.
        target: String,
        /// Final scale factor.
        factor: f64,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
    /// Slide in from one side.
    SlideIn {
        /// Selector.
        target: String,
        /// Side to enter from.
        #[serde(default)]
        from: SlideFrom,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
    /// Draw strokes.
    DrawPath {
        /// Selector.
        target: String,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
    /// Translate, optionally from a fixed origin.
    MoveTo {
        /// Selector.
        target: String,
        /// Snap here first.
        #[serde(default)]
        from: Option<Point>,
        /// Final translation.
        to: Point,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
    /// Transient grow-and-settle.
    Pulse {
        /// Selector.
        target: String,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
    /// Crossfade text.
    MorphText {
        /// Selector.
        target: String,
        /// New text.
        text: String,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
    /// Clear, recolor and morph text.
    ChangeText {
        /// Selector.
        target: String,
        /// New text.
        text: String,
        /// Fill, hex or palette name.
        fill: String,
        /// Morph duration.
        #[serde(default)]
        duration: Option<DurationRef>,
    },
    /// Draw an arrow group.
    AnimateArrow {
        /// Selector of arrow groups.
        target: String,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
    /// Undraw an arrow group.
    UnanimateArrow {
        /// Selector of arrow groups.
        target: String,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
    /// Gap at the end of the timeline.
    Wait {
        /// Gap length.
        duration: DurationRef,
    },
    /// Label and navigable step.
    Label {
        /// Label name.
        name: String,
    },
    /// Steps that start together.
    Group {
        /// Grouped steps.
        steps: Vec<Step>,
    },
    /// Staggered node fade-in followed by staggered arrow drawing.
    SequentialReveal {
        /// Node selector.
        nodes: String,
        /// Arrow selector.
        arrows: String,
        /// Delay before the nodes.
        #[serde(default)]
        node_delay: Option<DurationRef>,
        /// Delay before the arrows.
        #[serde(default)]
        arrow_delay: Option<DurationRef>,
    },
    /// Pulse along a flow.
    HighlightFlow {
        /// Selector.
        target: String,
        /// Timing overrides.
        #[serde(flatten)]
        options: StepOptions,
    },
}

/// A declarative animation sequence for one diagram.
///
/// ```json
/// {
///   "name": "replication",
///   "hidden": ["#arrow1"],
///   "steps": [
///     { "op": "animate_arrow", "target": "#arrow1", "duration": "fast" },
///     { "op": "label", "name": "replicated" }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Extra named colors; these shadow the built-in palette.
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    /// Extra named durations; these shadow the built-in ones.
    #[serde(default)]
    pub durations: BTreeMap<String, Secs>,
    /// Selectors hidden before the first step.
    #[serde(default)]
    pub hidden: Vec<String>,
    /// Instructions in authoring order.
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse and validate JSON text.
    pub fn from_json(text: &str) -> SvgStepResult<Self> {
        let script: Self = serde_json::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SvgStepResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read script {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Hex value for a palette or script color name; hex input passes through.
    pub fn color(&self, name: &str) -> Option<String> {
        if name.starts_with('#') {
            return Some(name.to_owned());
        }
        self.colors
            .get(name)
            .cloned()
            .or_else(|| Palette::lookup(name).map(str::to_owned))
    }

    /// Seconds for a literal or named duration.
    pub fn seconds(&self, d: &DurationRef) -> SvgStepResult<Secs> {
        let secs = match d {
            DurationRef::Secs(s) => *s,
            DurationRef::Named(name) => self
                .durations
                .get(name)
                .copied()
                .or_else(|| Durations::lookup(name))
                .ok_or_else(|| SvgStepError::script(format!("unknown duration '{name}'")))?,
        };
        if !secs.is_finite() || secs < 0.0 {
            return Err(SvgStepError::script(format!(
                "duration must be finite and >= 0, got {secs}"
            )));
        }
        Ok(secs)
    }

    /// Check names, selectors and numbers without touching any document.
    pub fn validate(&self) -> SvgStepResult<()> {
        for (name, hex) in &self.colors {
            if Color::parse_hex(hex).is_none() {
                return Err(SvgStepError::script(format!(
                    "color '{name}' must be a hex value, got '{hex}'"
                )));
            }
        }
        for (name, secs) in &self.durations {
            if !secs.is_finite() || *secs < 0.0 {
                return Err(SvgStepError::script(format!(
                    "duration '{name}' must be finite and >= 0"
                )));
            }
        }
        for s in &self.hidden {
            check_selector(s)?;
        }
        self.validate_steps(&self.steps)
    }

    fn validate_steps(&self, steps: &[Step]) -> SvgStepResult<()> {
        for step in steps {
            match step {
                Step::Hide { targets } => {
                    for t in targets {
                        check_selector(t)?;
                    }
                }
                Step::Set { target, props } | Step::Show { target, props } => {
                    check_selector(target)?;
                    self.resolve_props(props)?;
                }
                Step::SetText { target, .. } => check_selector(target)?,
                Step::FadeIn { target, options }
                | Step::FadeOut { target, options }
                | Step::DrawPath { target, options }
                | Step::Pulse { target, options }
                | Step::MorphText {
                    target, options, ..
                }
                | Step::AnimateArrow { target, options }
                | Step::UnanimateArrow { target, options }
                | Step::HighlightFlow { target, options }
                | Step::SlideIn {
                    target, options, ..
                }
                | Step::MoveTo {
                    target, options, ..
                } => {
                    check_selector(target)?;
                    self.options(options)?;
                }
                Step::Scale {
                    target,
                    factor,
                    options,
                } => {
                    check_selector(target)?;
                    if !factor.is_finite() {
                        return Err(SvgStepError::script("scale factor must be finite"));
                    }
                    self.options(options)?;
                }
                Step::ChangeText {
                    target,
                    fill,
                    duration,
                    ..
                } => {
                    check_selector(target)?;
                    self.paint(fill)?;
                    if let Some(d) = duration {
                        self.seconds(d)?;
                    }
                }
                Step::Wait { duration } => {
                    self.seconds(duration)?;
                }
                Step::Label { name } => {
                    if name.trim().is_empty() {
                        return Err(SvgStepError::script("label name must be non-empty"));
                    }
                }
                Step::Group { steps } => self.validate_steps(steps)?,
                Step::SequentialReveal {
                    nodes,
                    arrows,
                    node_delay,
                    arrow_delay,
                } => {
                    check_selector(nodes)?;
                    check_selector(arrows)?;
                    for d in [node_delay, arrow_delay].into_iter().flatten() {
                        self.seconds(d)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Paint text with palette names swapped for hex.
    pub(crate) fn paint(&self, value: &str) -> SvgStepResult<String> {
        if value.starts_with('#') || matches!(value, "none" | "currentColor") {
            return Ok(value.to_owned());
        }
        self.color(value)
            .ok_or_else(|| SvgStepError::script(format!("unknown color '{value}'")))
    }

    /// Copy of `props` with named paints resolved.
    pub(crate) fn resolve_props(&self, props: &PropertyMap) -> SvgStepResult<PropertyMap> {
        let mut out = props.clone();
        for (prop, value) in out.values_mut() {
            if !prop.is_paint() {
                continue;
            }
            if let Some(name) = value.as_keyword()
                && !name.starts_with("url(")
            {
                let hex = self.paint(name)?;
                *value = Value::parse_for(prop, &hex);
            }
        }
        Ok(out)
    }
}

fn check_selector(s: &str) -> SvgStepResult<()> {
    if s.trim().is_empty() {
        return Err(SvgStepError::script("selector must be non-empty"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
