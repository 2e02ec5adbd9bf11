use crate::animator::options::AnimationOptions;
use crate::animator::stage::Stage;
use crate::foundation::error::SvgStepResult;
use crate::script::model::{Script, Step, StepOptions};
use crate::script::presets::{highlight_flow, sequential_reveal};

impl Script {
    pub(crate) fn options(&self, o: &StepOptions) -> SvgStepResult<AnimationOptions> {
        let mut out = AnimationOptions::new();
        if let Some(d) = &o.duration {
            out = out.duration(self.seconds(d)?);
        }
        if let Some(d) = &o.delay {
            out = out.delay(self.seconds(d)?);
        }
        if let Some(e) = o.ease {
            out = out.ease(e);
        }
        if let Some(s) = o.stagger {
            out = out.stagger(s.max(0.0));
        }
        Ok(out)
    }

    /// Hide the `hidden` selectors, then replay every step onto `stage`.
    ///
    /// The script is validated first, so a failure leaves the stage untouched. Selectors that
    /// match nothing are warnings on the animator, not errors.
    #[tracing::instrument(
        skip_all,
        fields(script = self.name.as_deref().unwrap_or("unnamed"), steps = self.steps.len())
    )]
    pub fn apply<S: Stage>(&self, stage: &mut S) -> SvgStepResult<()> {
        self.validate()?;
        let hidden: Vec<&str> = self.hidden.iter().map(String::as_str).collect();
        stage.hide_elements(&hidden);
        self.play_steps(stage, &self.steps)
    }

    fn play_steps<S: Stage>(&self, stage: &mut S, steps: &[Step]) -> SvgStepResult<()> {
        for step in steps {
            match step {
                Step::Set { target, props } => {
                    stage.set(target, self.resolve_props(props)?);
                }
                Step::Hide { targets } => {
                    let targets: Vec<&str> = targets.iter().map(String::as_str).collect();
                    stage.hide_elements(&targets);
                }
                Step::SetText { target, text } => {
                    stage.set_text(target, text);
                }
                Step::Show { target, props } => {
                    stage.show(target, self.resolve_props(props)?);
                }
                Step::FadeIn { target, options } => {
                    stage.fade_in(target, self.options(options)?);
                }
                Step::FadeOut { target, options } => {
                    stage.fade_out(target, self.options(options)?);
                }
                Step::Scale {
                    target,
                    factor,
                    options,
                } => {
                    stage.scale(target, *factor, self.options(options)?);
                }
                Step::SlideIn {
                    target,
                    from,
                    options,
                } => {
                    stage.slide_in(target, *from, self.options(options)?);
                }
                Step::DrawPath { target, options } => {
                    stage.draw_path(target, self.options(options)?);
                }
                Step::MoveTo {
                    target,
                    from,
                    to,
                    options,
                } => {
                    stage.move_to(target, *from, *to, self.options(options)?);
                }
                Step::Pulse { target, options } => {
                    stage.pulse(target, self.options(options)?);
                }
                Step::MorphText {
                    target,
                    text,
                    options,
                } => {
                    stage.morph_text(target, text, self.options(options)?);
                }
                Step::ChangeText {
                    target,
                    text,
                    fill,
                    duration,
                } => {
                    let duration = duration.as_ref().map(|d| self.seconds(d)).transpose()?;
                    stage.change_text(target, text, &self.paint(fill)?, duration);
                }
                Step::AnimateArrow { target, options } => {
                    stage.animate_arrow(target, self.options(options)?);
                }
                Step::UnanimateArrow { target, options } => {
                    stage.unanimate_arrow(target, self.options(options)?);
                }
                Step::Wait { duration } => {
                    stage.wait(self.seconds(duration)?);
                }
                Step::Label { name } => {
                    stage.add_label(name);
                }
                Step::Group { steps } => {
                    let mut result = Ok(());
                    stage.group(|g| result = self.play_steps(g, steps));
                    result?;
                }
                Step::SequentialReveal {
                    nodes,
                    arrows,
                    node_delay,
                    arrow_delay,
                } => {
                    let nd = node_delay.as_ref().map(|d| self.seconds(d)).transpose()?;
                    let ad = arrow_delay.as_ref().map(|d| self.seconds(d)).transpose()?;
                    sequential_reveal(
                        stage,
                        nodes,
                        arrows,
                        nd.unwrap_or(0.0),
                        ad.unwrap_or(0.0),
                    );
                }
                Step::HighlightFlow { target, options } => {
                    highlight_flow(stage, target, self.options(options)?);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/player.rs"]
mod tests;
