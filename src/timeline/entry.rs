use std::fmt;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::animation::props::PropertyMap;
use crate::animation::value::{Prop, Value, interpolate};
use crate::document::tree::{NodeId, SvgDocument};
use crate::foundation::core::{Secs, TIME_EPSILON};
use crate::foundation::math::clamp01;

/// Shared callback attached to a timeline entry.
pub type Callback = Rc<dyn Fn()>;

/// Optional start/complete hooks of an entry.
#[derive(Clone, Default)]
pub struct Callbacks {
    /// Fired when playback moves forward out of the entry's start.
    pub on_start: Option<Callback>,
    /// Fired when playback moves forward onto the entry's end.
    pub on_complete: Option<Callback>,
}

impl Callbacks {
    /// Callbacks with only `on_complete` set.
    pub fn on_complete(cb: Option<Callback>) -> Self {
        Self {
            on_start: None,
            on_complete: cb,
        }
    }

    /// Callbacks with only `on_start` set.
    pub fn on_start(cb: Option<Callback>) -> Self {
        Self {
            on_start: cb,
            on_complete: None,
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Where an entry lands on the timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Placement {
    /// After the current end of the timeline.
    #[default]
    Append,
    /// At a fixed offset from the timeline start.
    At(Secs),
}

/// Timing attributes of one entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    /// Length of one cycle for one target.
    pub duration: Secs,
    /// Offset added to the placement.
    pub delay: Secs,
    /// Offset between consecutive targets.
    pub stagger: Secs,
    /// Curve applied to each cycle.
    pub ease: Ease,
    /// Extra cycles after the first.
    pub repeat: u32,
    /// Run odd cycles backward.
    pub yoyo: bool,
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Timing {
    /// A single cycle of `duration` seconds with the default ease.
    pub fn new(duration: Secs) -> Self {
        Self {
            duration: duration.max(0.0),
            delay: 0.0,
            stagger: 0.0,
            ease: Ease::default(),
            repeat: 0,
            yoyo: false,
        }
    }

    /// Replace the ease.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Replace the delay.
    pub fn delay(mut self, delay: Secs) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Replace the stagger.
    pub fn stagger(mut self, stagger: Secs) -> Self {
        self.stagger = stagger.max(0.0);
        self
    }

    /// Repeat `repeat` extra times, optionally alternating direction.
    pub fn repeat(mut self, repeat: u32, yoyo: bool) -> Self {
        self.repeat = repeat;
        self.yoyo = yoyo;
        self
    }

    /// Active length of one target including repeats.
    pub fn active(&self) -> Secs {
        self.duration * f64::from(self.repeat + 1)
    }

    /// Length from the first target's start to the last target's end.
    pub fn span(&self, targets: usize) -> Secs {
        self.stagger * targets.saturating_sub(1) as f64 + self.active()
    }

    /// Eased ratio for a target whose own start lies `local` seconds behind the playhead.
    pub(crate) fn ratio(&self, local: Secs, forward: bool) -> f64 {
        let p = raw_progress(local, self.active(), forward);
        let cycles = f64::from(self.repeat + 1);
        let (cycle, mut frac) = if p >= 1.0 {
            (self.repeat, 1.0)
        } else {
            let scaled = p * cycles;
            (scaled.floor() as u32, scaled.fract())
        };
        if self.yoyo && cycle % 2 == 1 {
            frac = 1.0 - frac;
        }
        self.ease.apply(frac)
    }
}

/// Linear progress through an interval of `length` seconds. Zero-length intervals are done once
/// the playhead is past them, or on them while moving forward.
fn raw_progress(local: Secs, length: Secs, forward: bool) -> f64 {
    if length <= TIME_EPSILON {
        let done = local > TIME_EPSILON || (forward && local >= -TIME_EPSILON);
        return if done { 1.0 } else { 0.0 };
    }
    clamp01(local / length)
}

/// Before/after text of one `<text>` element, fixed when the morph is scheduled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MorphRecord {
    /// Element whose text changes.
    pub node: NodeId,
    /// Text restored when playback moves back past the morph.
    pub before: String,
    /// Text shown from the crossover on.
    pub after: String,
}

/// What an entry drives.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Interpolate properties of elements toward final values.
    Tween {
        /// Elements in stagger order.
        targets: Vec<NodeId>,
        /// Final values.
        props: PropertyMap,
    },
    /// Crossfade one text element to new content.
    Morph(MorphRecord),
    /// No visual effect; a time marker that may carry callbacks.
    Call,
}

impl Payload {
    fn target_count(&self) -> usize {
        match self {
            Self::Tween { targets, .. } => targets.len(),
            Self::Morph(_) | Self::Call => 1,
        }
    }
}

/// Kind of an entry, for inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// [`Payload::Tween`].
    Tween,
    /// [`Payload::Morph`].
    Morph,
    /// [`Payload::Call`].
    Call,
}

/// Absolute `[start, end]` interval of an entry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Span {
    /// Start including delay.
    pub start: Secs,
    /// End of the last target's last cycle.
    pub end: Secs,
}

impl Span {
    /// `end - start`.
    pub fn duration(&self) -> Secs {
        self.end - self.start
    }
}

/// Progress notifications produced by rendering one entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) started: bool,
    pub(crate) completed: bool,
}

/// A scheduled entry with its playback state.
#[derive(Debug)]
pub struct Entry {
    pub(crate) seq: usize,
    payload: Payload,
    timing: Timing,
    callbacks: Callbacks,
    span: Span,
    from: Option<Vec<Vec<(Prop, Value)>>>,
    progress: f64,
}

impl Entry {
    pub(crate) fn new(
        seq: usize,
        payload: Payload,
        timing: Timing,
        start: Secs,
        callbacks: Callbacks,
    ) -> Self {
        let end = start + timing.span(payload.target_count());
        Self {
            seq,
            payload,
            timing,
            callbacks,
            span: Span { start, end },
            from: None,
            progress: 0.0,
        }
    }

    /// Scheduled interval.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Timing attributes.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Kind of payload.
    pub fn kind(&self) -> EntryKind {
        match self.payload {
            Payload::Tween { .. } => EntryKind::Tween,
            Payload::Morph(_) => EntryKind::Morph,
            Payload::Call => EntryKind::Call,
        }
    }

    /// Elements touched by this entry.
    pub fn targets(&self) -> Vec<NodeId> {
        match &self.payload {
            Payload::Tween { targets, .. } => targets.clone(),
            Payload::Morph(m) => vec![m.node],
            Payload::Call => Vec::new(),
        }
    }

    /// Linear progress at the last render, 0..1.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub(crate) fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    fn progress_at(&self, t: Secs, forward: bool) -> f64 {
        raw_progress(t - self.span.start, self.span.duration(), forward)
    }

    /// Bring the entry to playhead `t`. Start values are captured on the first render that
    /// leaves progress 0; untouched entries write nothing.
    pub(crate) fn render(&mut self, doc: &mut SvgDocument, t: Secs, forward: bool) -> Transition {
        let p = self.progress_at(t, forward);
        let prev = self.progress;
        if self.from.is_none() {
            if p <= 0.0 {
                return Transition::default();
            }
            self.from = Some(self.capture(doc));
        } else if p == prev {
            return Transition::default();
        }
        self.progress = p;

        match &self.payload {
            Payload::Tween { targets, props } => {
                let from = self.from.as_deref().unwrap_or_default();
                for (i, (node, start_values)) in targets.iter().zip(from).enumerate() {
                    let local = t - self.span.start - self.timing.stagger * i as f64;
                    let ratio = self.timing.ratio(local, forward);
                    for ((prop, to), (_, start)) in props.iter().zip(start_values) {
                        doc.apply(*node, prop, interpolate(prop, start, to, ratio));
                    }
                }
            }
            Payload::Morph(record) => {
                let v = self.timing.ratio(t - self.span.start, forward);
                render_morph(doc, record, v, p >= 1.0);
            }
            Payload::Call => {}
        }

        Transition {
            started: forward && prev <= 0.0 && p > 0.0,
            completed: forward && prev < 1.0 && p >= 1.0,
        }
    }

    fn capture(&self, doc: &SvgDocument) -> Vec<Vec<(Prop, Value)>> {
        match &self.payload {
            Payload::Tween { targets, props } => targets
                .iter()
                .map(|n| props.props().map(|p| (p, doc.get(*n, p))).collect())
                .collect(),
            Payload::Morph(_) | Payload::Call => Vec::new(),
        }
    }
}

/// Below the crossover the old text fades and shrinks to 70%; above it the new text grows back.
fn render_morph(doc: &mut SvgDocument, record: &MorphRecord, v: f64, complete: bool) {
    let (text, opacity, scale) = if complete {
        (&record.after, 1.0, 1.0)
    } else if v < 0.5 {
        let p = clamp01(v * 2.0);
        (&record.before, 1.0 - p, 1.0 - p * 0.3)
    } else {
        let p = clamp01((v - 0.5) * 2.0);
        (&record.after, p, 0.7 + p * 0.3)
    };
    if doc.text_content(record.node) != *text {
        doc.set_text_content(record.node, text);
    }
    doc.apply(record.node, Prop::Opacity, Value::Number(opacity));
    doc.apply(record.node, Prop::Scale, Value::Number(scale));
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/entry.rs"]
mod tests;
