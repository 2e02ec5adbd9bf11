use std::fmt;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::foundation::core::Secs;
use crate::timeline::entry::{Callback, Callbacks, Timing};

/// Per-operation overrides. Unset fields fall back to the operation's own defaults.
#[derive(Clone, Default)]
pub struct AnimationOptions {
    /// Seconds per target.
    pub duration: Option<Secs>,
    /// Seconds added before the operation starts.
    pub delay: Option<Secs>,
    /// Easing curve.
    pub ease: Option<Ease>,
    /// Seconds between consecutive targets.
    pub stagger: Option<Secs>,
    /// Fired when the operation starts playing forward.
    pub on_start: Option<Callback>,
    /// Fired when the operation finishes playing forward.
    pub on_complete: Option<Callback>,
}

impl AnimationOptions {
    /// All defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the duration.
    pub fn duration(mut self, secs: Secs) -> Self {
        self.duration = Some(secs);
        self
    }

    /// Override the delay.
    pub fn delay(mut self, secs: Secs) -> Self {
        self.delay = Some(secs);
        self
    }

    /// Override the ease.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Override the stagger.
    pub fn stagger(mut self, secs: Secs) -> Self {
        self.stagger = Some(secs);
        self
    }

    /// Attach a start callback.
    pub fn on_start(mut self, f: impl Fn() + 'static) -> Self {
        self.on_start = Some(Rc::new(f));
        self
    }

    /// Attach a completion callback.
    pub fn on_complete(mut self, f: impl Fn() + 'static) -> Self {
        self.on_complete = Some(Rc::new(f));
        self
    }

    pub(crate) fn timing(&self, duration: Secs, ease: Ease) -> Timing {
        Timing::new(self.duration.unwrap_or(duration))
            .ease(self.ease.unwrap_or(ease))
            .delay(self.delay.unwrap_or(0.0))
            .stagger(self.stagger.unwrap_or(0.0))
    }

    pub(crate) fn callbacks(&self) -> Callbacks {
        Callbacks {
            on_start: self.on_start.clone(),
            on_complete: self.on_complete.clone(),
        }
    }
}

impl fmt::Debug for AnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("ease", &self.ease)
            .field("stagger", &self.stagger)
            .field("on_start", &self.on_start.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
