use crate::document::tree::SvgDocument;
use crate::foundation::core::{Secs, TIME_EPSILON};
use crate::foundation::error::{SvgStepError, SvgStepResult};
use crate::timeline::entry::{Callback, Callbacks, Entry, Payload, Placement, Span, Timing};

/// Playhead target: an absolute time or a label name.
#[derive(Clone, Debug, PartialEq)]
pub enum SeekTarget {
    /// Seconds from the timeline start.
    Time(Secs),
    /// A label recorded with [`Timeline::add_label`].
    Label(String),
}

impl From<f64> for SeekTarget {
    fn from(value: f64) -> Self {
        Self::Time(value)
    }
}

impl From<&str> for SeekTarget {
    fn from(value: &str) -> Self {
        Self::Label(value.to_owned())
    }
}

impl From<String> for SeekTarget {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

/// How [`Timeline::advance`] moves the playhead.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Playback {
    /// Playhead holds still.
    #[default]
    Paused,
    /// Moving toward the end.
    Playing,
    /// Moving toward the start.
    Reversing,
    /// Moving toward a fixed time, then pausing there.
    TweeningTo(Secs),
}

/// Ordered set of scheduled entries with a playhead driven by an external clock.
///
/// The timeline never reads a clock itself: [`Timeline::advance`] is called once per frame with
/// the elapsed seconds. Entries render in start order when the playhead moves forward and in
/// reverse start order when it moves backward, so stepping back over an entry restores the
/// values it overwrote.
#[derive(Debug, Default)]
pub struct Timeline {
    entries: Vec<Entry>,
    labels: Vec<(String, Secs)>,
    time: Secs,
    state: Playback,
    killed: bool,
    next_seq: usize,
}

impl Timeline {
    /// Empty, paused timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// End of the latest entry.
    pub fn duration(&self) -> Secs {
        self.entries
            .iter()
            .map(|e| e.span().end)
            .fold(0.0, f64::max)
    }

    /// Playhead position.
    pub fn time(&self) -> Secs {
        self.time
    }

    /// Current playback mode.
    pub fn state(&self) -> Playback {
        self.state
    }

    /// Whether [`Timeline::advance`] would move the playhead.
    pub fn is_active(&self) -> bool {
        self.state != Playback::Paused
    }

    /// Whether [`Timeline::kill`] has been called.
    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// Scheduled entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Labels in insertion order, duplicates included.
    pub fn labels(&self) -> impl Iterator<Item = (&str, Secs)> {
        self.labels.iter().map(|(n, t)| (n.as_str(), *t))
    }

    /// Time of the most recent label called `name`.
    pub fn label_time(&self, name: &str) -> Option<Secs> {
        self.labels
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, t)| *t)
    }

    /// Schedule an entry. Returns its interval, or `None` when there is nothing to schedule
    /// (killed timeline, tween without targets).
    pub fn enqueue(
        &mut self,
        payload: Payload,
        timing: Timing,
        placement: Placement,
        callbacks: Callbacks,
    ) -> Option<Span> {
        if self.killed {
            return None;
        }
        if let Payload::Tween { targets, .. } = &payload
            && targets.is_empty()
        {
            return None;
        }

        let base = match placement {
            Placement::Append => self.duration(),
            Placement::At(t) => t.max(0.0),
        };
        let start = base + timing.delay;
        let entry = Entry::new(self.next_seq, payload, timing, start, callbacks);
        self.next_seq += 1;
        let span = entry.span();
        tracing::debug!(
            kind = ?entry.kind(),
            start = span.start,
            end = span.end,
            "enqueue"
        );
        self.entries.push(entry);
        Some(span)
    }

    /// Record `name` at the current duration and return that time.
    pub fn add_label(&mut self, name: &str) -> Secs {
        let at = self.duration();
        if !self.killed {
            self.labels.push((name.to_owned(), at));
            tracing::debug!(label = name, at, "add label");
        }
        at
    }

    fn resolve(&self, target: &SeekTarget) -> SvgStepResult<Secs> {
        let t = match target {
            SeekTarget::Time(t) if t.is_finite() => *t,
            SeekTarget::Time(t) => {
                return Err(SvgStepError::timeline(format!("invalid time {t}")));
            }
            SeekTarget::Label(name) => self
                .label_time(name)
                .ok_or_else(|| SvgStepError::timeline(format!("unknown label '{name}'")))?,
        };
        Ok(t.clamp(0.0, self.duration()))
    }

    /// Move forward from the playhead.
    pub fn play(&mut self) {
        if self.killed {
            return;
        }
        self.state = if self.time < self.duration() - TIME_EPSILON {
            Playback::Playing
        } else {
            Playback::Paused
        };
        tracing::debug!(time = self.time, "play");
    }

    /// Stop moving.
    pub fn pause(&mut self) {
        self.state = Playback::Paused;
    }

    /// Move backward from the playhead.
    pub fn reverse(&mut self) {
        if self.killed {
            return;
        }
        self.state = if self.time > TIME_EPSILON {
            Playback::Reversing
        } else {
            Playback::Paused
        };
        tracing::debug!(time = self.time, "reverse");
    }

    /// Jump to the start, undoing every entry, then play.
    pub fn restart(&mut self, doc: &mut SvgDocument) {
        if self.killed {
            return;
        }
        self.render(doc, 0.0, false, true);
        self.play();
    }

    /// Jump the playhead without firing callbacks. Cancels a pending [`Timeline::tween_to`];
    /// otherwise the playback mode is kept.
    pub fn seek(
        &mut self,
        doc: &mut SvgDocument,
        target: impl Into<SeekTarget>,
    ) -> SvgStepResult<()> {
        if self.killed {
            return Ok(());
        }
        let t = self.resolve(&target.into())?;
        if matches!(self.state, Playback::TweeningTo(_)) {
            self.state = Playback::Paused;
        }
        let forward = t >= self.time;
        self.render(doc, t, forward, true);
        tracing::debug!(time = t, "seek");
        Ok(())
    }

    /// Move the playhead to `target` at normal speed on subsequent [`Timeline::advance`] calls.
    pub fn tween_to(&mut self, target: impl Into<SeekTarget>) -> SvgStepResult<()> {
        if self.killed {
            return Ok(());
        }
        let t = self.resolve(&target.into())?;
        self.state = if (t - self.time).abs() <= TIME_EPSILON {
            Playback::Paused
        } else {
            Playback::TweeningTo(t)
        };
        tracing::debug!(from = self.time, to = t, "tween to");
        Ok(())
    }

    /// Advance the external clock by `dt` seconds and render the new playhead position.
    pub fn advance(&mut self, doc: &mut SvgDocument, dt: Secs) {
        if self.killed || dt <= 0.0 || !dt.is_finite() {
            return;
        }
        let end = self.duration();
        let (next, settled) = match self.state {
            Playback::Paused => return,
            Playback::Playing => {
                let t = (self.time + dt).min(end);
                (t, t >= end)
            }
            Playback::Reversing => {
                let t = (self.time - dt).max(0.0);
                (t, t <= 0.0)
            }
            Playback::TweeningTo(target) => {
                let t = if target >= self.time {
                    (self.time + dt).min(target)
                } else {
                    (self.time - dt).max(target)
                };
                (t, (t - target).abs() <= TIME_EPSILON)
            }
        };
        let forward = next >= self.time;
        self.render(doc, next, forward, false);
        if settled {
            self.state = Playback::Paused;
        }
    }

    /// Drop every entry, label and callback. Later calls on this timeline do nothing.
    pub fn kill(&mut self) {
        if self.killed {
            return;
        }
        self.killed = true;
        self.state = Playback::Paused;
        self.entries.clear();
        self.labels.clear();
        tracing::debug!("timeline killed");
    }

    fn render(&mut self, doc: &mut SvgDocument, t: Secs, forward: bool, suppress: bool) {
        self.time = t;
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|a, b| {
            let (ea, eb) = (&self.entries[*a], &self.entries[*b]);
            ea.span()
                .start
                .total_cmp(&eb.span().start)
                .then(ea.seq.cmp(&eb.seq))
        });
        if !forward {
            order.reverse();
        }

        let mut fire: Vec<Callback> = Vec::new();
        for i in order {
            let entry = &mut self.entries[i];
            let tr = entry.render(doc, t, forward);
            if suppress {
                continue;
            }
            let cbs = entry.callbacks();
            if tr.started
                && let Some(cb) = &cbs.on_start
            {
                fire.push(cb.clone());
            }
            if tr.completed
                && let Some(cb) = &cbs.on_complete
            {
                fire.push(cb.clone());
            }
        }
        for cb in fire {
            cb();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/engine.rs"]
mod tests;
