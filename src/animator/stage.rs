use kurbo::Point;

use crate::animation::props::PropertyMap;
use crate::animator::core::Animator;
use crate::animator::options::AnimationOptions;
use crate::foundation::core::{Secs, SlideFrom};
use crate::timeline::entry::Placement;

/// Fluent operation surface shared by [`Animator`] and [`Group`].
///
/// On an animator, timed operations append after the current end of the timeline. Inside a
/// [`Group`] they all start at the offset the group was opened at.
pub trait Stage {
    /// Animator the operations write to.
    fn animator(&mut self) -> &mut Animator;

    /// Where timed operations land.
    fn placement(&self) -> Placement;

    /// Apply properties immediately, outside the timeline.
    fn set(&mut self, selector: &str, props: PropertyMap) -> &mut Self {
        self.animator().set_at(selector, &props);
        self
    }

    /// Hide every selector immediately (`autoAlpha: 0`).
    fn hide_elements(&mut self, selectors: &[&str]) -> &mut Self {
        let hidden = PropertyMap::new().auto_alpha(0.0);
        for s in selectors {
            self.animator().set_at(s, &hidden);
        }
        self
    }

    /// Replace the text of matching `<text>` elements immediately.
    fn set_text(&mut self, selector: &str, text: &str) -> &mut Self {
        self.animator().set_text_at(selector, text);
        self
    }

    /// Near-instant tween over the targets and all their descendants. Unlike [`Stage::set`]
    /// this is undone when playback moves back past it.
    fn show(&mut self, selector: &str, props: PropertyMap) -> &mut Self {
        let at = self.placement();
        self.animator().show_at(at, selector, props);
        self
    }

    /// Snap opacity to 0 now, tween it to 1.
    fn fade_in(&mut self, selector: &str, opts: AnimationOptions) -> &mut Self {
        let at = self.placement();
        self.animator().fade_in_at(at, selector, opts);
        self
    }

    /// Tween opacity to 0.
    fn fade_out(&mut self, selector: &str, opts: AnimationOptions) -> &mut Self {
        let at = self.placement();
        self.animator().fade_out_at(at, selector, opts);
        self
    }

    /// Tween a uniform scale about each element's centre.
    fn scale(&mut self, selector: &str, factor: f64, opts: AnimationOptions) -> &mut Self {
        let at = self.placement();
        self.animator().scale_at(at, selector, factor, opts);
        self
    }

    /// Enter from 100 units off to one side while fading in.
    fn slide_in(&mut self, selector: &str, from: SlideFrom, opts: AnimationOptions) -> &mut Self {
        let at = self.placement();
        self.animator().slide_in_at(at, selector, from, opts);
        self
    }

    /// Draw strokes from nothing to their full length.
    fn draw_path(&mut self, selector: &str, opts: AnimationOptions) -> &mut Self {
        let at = self.placement();
        self.animator().draw_path_at(at, selector, opts);
        self
    }

    /// Translate to `to`, optionally snapping to `from` first.
    fn move_to(
        &mut self,
        selector: &str,
        from: Option<Point>,
        to: Point,
        opts: AnimationOptions,
    ) -> &mut Self {
        let at = self.placement();
        self.animator().move_to_at(at, selector, from, to, opts);
        self
    }

    /// Grow to 110% and back.
    fn pulse(&mut self, selector: &str, opts: AnimationOptions) -> &mut Self {
        let at = self.placement();
        self.animator().pulse_at(at, selector, opts);
        self
    }

    /// Crossfade the text of matching `<text>` elements to `text`.
    fn morph_text(&mut self, selector: &str, text: &str, opts: AnimationOptions) -> &mut Self {
        let at = self.placement();
        self.animator().morph_text_at(at, selector, text, opts);
        self
    }

    /// Clear the text, recolor it with `fill`, then morph to `text` (0.5s by default).
    fn change_text(
        &mut self,
        selector: &str,
        text: &str,
        fill: &str,
        duration: Option<Secs>,
    ) -> &mut Self {
        let at = self.placement();
        self.animator()
            .change_text_at(at, selector, text, fill, duration);
        self
    }

    /// Reveal an arrow group: draw its shaft, then show its head.
    fn animate_arrow(&mut self, selector: &str, opts: AnimationOptions) -> &mut Self {
        let at = self.placement();
        self.animator().animate_arrow_at(at, selector, opts);
        self
    }

    /// Undo [`Stage::animate_arrow`]: hide the head, retract the shaft, hide the group.
    fn unanimate_arrow(&mut self, selector: &str, opts: AnimationOptions) -> &mut Self {
        let at = self.placement();
        self.animator().unanimate_arrow_at(at, selector, opts);
        self
    }

    /// Leave a gap of `secs` after the current end of the timeline.
    fn wait(&mut self, secs: Secs) -> &mut Self {
        self.animator().wait_for(secs);
        self
    }

    /// Record a label and a navigable step at the current end of the timeline.
    fn add_label(&mut self, name: &str) -> &mut Self {
        self.animator().label(name);
        self
    }

    /// Run `f` with every timed operation starting at the current end of the timeline.
    fn group(&mut self, f: impl FnOnce(&mut Group<'_>)) -> &mut Self {
        let animator = self.animator();
        let at = animator.timeline.duration();
        f(&mut Group { animator, at });
        self
    }
}

impl Stage for Animator {
    fn animator(&mut self) -> &mut Animator {
        self
    }

    fn placement(&self) -> Placement {
        Placement::Append
    }
}

/// Scope created by [`Stage::group`]: operations start together at a fixed offset.
#[derive(Debug)]
pub struct Group<'a> {
    animator: &'a mut Animator,
    at: Secs,
}

impl Group<'_> {
    /// Offset shared by the group's operations.
    pub fn offset(&self) -> Secs {
        self.at
    }
}

impl Stage for Group<'_> {
    fn animator(&mut self) -> &mut Animator {
        self.animator
    }

    fn placement(&self) -> Placement {
        Placement::At(self.at)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/stage.rs"]
mod tests;
