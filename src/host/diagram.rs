use crate::animator::core::Animator;
use crate::document::tree::SvgDocument;
use crate::foundation::core::Secs;
use crate::foundation::error::SvgStepResult;
use crate::script::model::Script;

/// Presentation options for a hosted diagram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HostOpts {
    /// Start playing as soon as the sequence is built.
    pub auto_play: bool,
    /// Offer Reset and Next controls.
    pub show_controls: bool,
    /// Offer a Replay control when the step controls are hidden.
    pub show_restart_button: bool,
}

/// A user-facing control the host currently offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// Rebuild and start over.
    Reset,
    /// Advance one step.
    Next,
    /// Rebuild and start over, without step controls.
    Replay,
}

/// Something that can populate a freshly built [`Animator`].
pub trait Sequence {
    /// Schedule operations on `animator`.
    fn build(&self, animator: &mut Animator) -> SvgStepResult<()>;
}

impl Sequence for Script {
    fn build(&self, animator: &mut Animator) -> SvgStepResult<()> {
        self.apply(animator)
    }
}

impl<F> Sequence for F
where
    F: Fn(&mut Animator),
{
    fn build(&self, animator: &mut Animator) -> SvgStepResult<()> {
        self(animator);
        Ok(())
    }
}

/// Proof that a load was started; only the newest ticket of a mounted host is honoured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    /// Load counter this ticket was issued at.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Owns the lifecycle of one animated diagram: load, build, play, step, replay and teardown.
///
/// Loading is split into [`DiagramHost::begin_load`] and [`DiagramHost::finish_load`] so the
/// markup can arrive asynchronously. A load that finishes after [`DiagramHost::unmount`] or after
/// a newer load began is dropped without building an animator.
pub struct DiagramHost<Q: Sequence> {
    sequence: Q,
    opts: HostOpts,
    source: Option<String>,
    animator: Option<Animator>,
    generation: u64,
    mounted: bool,
}

impl<Q: Sequence> DiagramHost<Q> {
    /// A host that has not loaded anything yet.
    pub fn new(sequence: Q, opts: HostOpts) -> Self {
        Self {
            sequence,
            opts,
            source: None,
            animator: None,
            generation: 0,
            mounted: false,
        }
    }

    /// Presentation options.
    pub fn opts(&self) -> HostOpts {
        self.opts
    }

    /// Whether an animator is built and live.
    pub fn is_loaded(&self) -> bool {
        self.animator.is_some()
    }

    /// Whether the host is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Live animator, if loaded.
    pub fn animator(&self) -> Option<&Animator> {
        self.animator.as_ref()
    }

    /// Live animator, if loaded.
    pub fn animator_mut(&mut self) -> Option<&mut Animator> {
        self.animator.as_mut()
    }

    /// Start a load. Any live animator is killed and every older ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.teardown();
        self.mounted = true;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "load started");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Finish the load `ticket` started with the fetched SVG text.
    ///
    /// Returns `Ok(false)` when the ticket is stale or the host was unmounted meanwhile.
    #[tracing::instrument(skip(self, svg), fields(generation = ticket.generation))]
    pub fn finish_load(&mut self, ticket: LoadTicket, svg: &str) -> SvgStepResult<bool> {
        if !self.mounted || ticket.generation != self.generation {
            tracing::debug!(current = self.generation, "discarding stale load");
            return Ok(false);
        }
        let doc = SvgDocument::parse(svg)?;
        let mut animator = Animator::new(doc);
        self.sequence.build(&mut animator)?;
        if self.opts.auto_play {
            animator.play();
        }
        self.source = Some(svg.to_owned());
        self.animator = Some(animator);
        Ok(true)
    }

    /// Load `svg` in one go.
    pub fn mount(&mut self, svg: &str) -> SvgStepResult<bool> {
        let ticket = self.begin_load();
        self.finish_load(ticket, svg)
    }

    /// Kill the live animator and refuse pending loads. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.teardown();
        self.mounted = false;
    }

    /// Kill the live animator and rebuild from the last markup.
    ///
    /// Returns `Ok(false)` when nothing was ever loaded.
    pub fn replay(&mut self) -> SvgStepResult<bool> {
        let Some(svg) = self.source.clone() else {
            return Ok(false);
        };
        let ticket = self.begin_load();
        self.finish_load(ticket, &svg)
    }

    /// Advance one step; returns whether another step remains.
    pub fn next(&mut self) -> bool {
        if let Some(a) = self.animator.as_mut() {
            a.next_step();
        }
        self.can_go_next()
    }

    /// Whether the Next control is enabled.
    pub fn can_go_next(&self) -> bool {
        self.animator.as_ref().is_some_and(Animator::has_next_step)
    }

    /// Controls to offer right now.
    pub fn controls(&self) -> Vec<Control> {
        if !self.is_loaded() {
            return Vec::new();
        }
        if self.opts.show_controls {
            vec![Control::Reset, Control::Next]
        } else if self.opts.show_restart_button {
            vec![Control::Replay]
        } else {
            Vec::new()
        }
    }

    /// Feed the frame clock to the live animator.
    pub fn tick(&mut self, dt: Secs) {
        if let Some(a) = self.animator.as_mut() {
            a.advance(dt);
        }
    }

    fn teardown(&mut self) {
        if let Some(mut a) = self.animator.take() {
            a.kill();
        }
    }
}

impl<Q: Sequence> Drop for DiagramHost<Q> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/diagram.rs"]
mod tests;
