use std::collections::BTreeMap;

use crate::animator::navigator::StepNavigator;
use crate::document::select::{matches, select};
use crate::document::tree::{NodeId, SvgDocument};
use crate::foundation::core::Secs;
use crate::foundation::error::SvgStepResult;
use crate::timeline::engine::{SeekTarget, Timeline};

/// Step animator bound to one SVG document.
///
/// Operations (see [`crate::Stage`]) resolve selectors against the bound root and schedule
/// entries on the owned [`Timeline`]. A selector that matches nothing is logged and recorded in
/// [`Animator::warnings`]; the operation then does nothing. An animator without a root (see
/// [`Animator::detached`]) treats every selector that way.
#[derive(Debug)]
pub struct Animator {
    pub(crate) doc: SvgDocument,
    root: Option<NodeId>,
    pub(crate) timeline: Timeline,
    pub(crate) nav: StepNavigator,
    pub(crate) projected_text: BTreeMap<NodeId, String>,
    warnings: Vec<String>,
}

impl Animator {
    /// Bind to the document's `<svg>` root.
    pub fn new(doc: SvgDocument) -> Self {
        let root = doc.root();
        Self::bound(doc, Some(root))
    }

    /// Bind to the first element matching `selector` (the `<svg>` root included). When nothing
    /// matches the animator is detached from the markup but keeps the document.
    pub fn with_root(doc: SvgDocument, selector: &str) -> Self {
        let found = match matches(&doc, doc.root(), selector) {
            Ok(true) => Ok(Some(doc.root())),
            Ok(false) => select(&doc, doc.root(), selector).map(|v| v.first().copied()),
            Err(e) => Err(e),
        };
        match found {
            Ok(Some(root)) => Self::bound(doc, Some(root)),
            Ok(None) => {
                let mut a = Self::bound(doc, None);
                a.warn(format!("svg root not found: {selector}"));
                a
            }
            Err(e) => {
                let mut a = Self::bound(doc, None);
                a.warn(format!("svg root not found: {selector} ({e})"));
                a
            }
        }
    }

    /// Parse `text` and bind to its `<svg>` root.
    pub fn from_svg_str(text: &str) -> SvgStepResult<Self> {
        Ok(Self::new(SvgDocument::parse(text)?))
    }

    /// An animator with no markup. Every operation warns and does nothing.
    pub fn detached() -> Self {
        Self::bound(SvgDocument::empty(), None)
    }

    fn bound(doc: SvgDocument, root: Option<NodeId>) -> Self {
        Self {
            doc,
            root,
            timeline: Timeline::new(),
            nav: StepNavigator::new(),
            projected_text: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Root element operations are scoped to.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The bound document with its current animated state.
    pub fn document(&self) -> &SvgDocument {
        &self.doc
    }

    /// The owned timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Direct timeline access.
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    /// Timeline and document together, for driving the timeline by hand.
    pub fn split_mut(&mut self) -> (&mut Timeline, &mut SvgDocument) {
        (&mut self.timeline, &mut self.doc)
    }

    /// Step navigation state.
    pub fn navigator(&self) -> &StepNavigator {
        &self.nav
    }

    /// Resolution misses recorded so far, oldest first.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Elements under the root matching `selector`, without recording misses.
    pub fn select(&self, selector: &str) -> Vec<NodeId> {
        self.root
            .and_then(|root| select(&self.doc, root, selector).ok())
            .unwrap_or_default()
    }

    pub(crate) fn warn(&mut self, msg: String) {
        tracing::warn!("{msg}");
        self.warnings.push(msg);
    }

    /// Resolve `selector`, recording exactly one warning when nothing is found.
    pub(crate) fn resolve(&mut self, selector: &str) -> Vec<NodeId> {
        let Some(root) = self.root else {
            self.warn(format!("no svg root bound; ignoring selector: {selector}"));
            return Vec::new();
        };
        match select(&self.doc, root, selector) {
            Ok(found) if !found.is_empty() => found,
            Ok(_) => {
                self.warn(format!("no elements found for selector: {selector}"));
                Vec::new()
            }
            Err(e) => {
                self.warn(format!("no elements found for selector: {selector} ({e})"));
                Vec::new()
            }
        }
    }

    /// Text an element will show once every morph scheduled so far has completed.
    pub(crate) fn projected_text(&self, node: NodeId) -> String {
        self.projected_text
            .get(&node)
            .cloned()
            .unwrap_or_else(|| self.doc.text_content(node))
    }

    /// Current step index, `-1` before the first.
    pub fn current_step(&self) -> isize {
        self.nav.current()
    }

    /// Number of recorded steps.
    pub fn total_steps(&self) -> usize {
        self.nav.total()
    }

    /// Whether [`Animator::next_step`] would move.
    pub fn has_next_step(&self) -> bool {
        self.nav.has_next()
    }

    /// Whether [`Animator::previous_step`] would move.
    pub fn has_previous_step(&self) -> bool {
        self.nav.has_previous()
    }

    /// Advance one step and travel to it smoothly.
    pub fn next_step(&mut self) -> &mut Self {
        if self.timeline.is_killed() {
            return self;
        }
        if let Some(t) = self.nav.next() {
            self.travel(t);
        }
        self
    }

    /// Go back one step and travel to it smoothly; from the first step, travel to time 0.
    pub fn previous_step(&mut self) -> &mut Self {
        if self.timeline.is_killed() {
            return self;
        }
        if let Some(t) = self.nav.previous() {
            self.travel(t);
        }
        self
    }

    fn travel(&mut self, t: Secs) {
        if let Err(e) = self.timeline.tween_to(t) {
            self.warn(format!("step navigation failed: {e}"));
        }
    }

    /// Play forward.
    pub fn play(&mut self) -> &mut Self {
        self.timeline.play();
        self
    }

    /// Hold the playhead.
    pub fn pause(&mut self) -> &mut Self {
        self.timeline.pause();
        self
    }

    /// Rewind to the start and play.
    pub fn restart(&mut self) -> &mut Self {
        self.timeline.restart(&mut self.doc);
        self
    }

    /// Play backward from the playhead.
    pub fn reverse(&mut self) -> &mut Self {
        self.timeline.reverse();
        self
    }

    /// Jump to a time or label. Unknown labels are logged and ignored.
    pub fn seek(&mut self, target: impl Into<SeekTarget>) -> &mut Self {
        if let Err(e) = self.timeline.seek(&mut self.doc, target) {
            self.warn(format!("seek ignored: {e}"));
        }
        self
    }

    /// Travel to a time or label at normal speed. Unknown labels are logged and ignored.
    pub fn tween_to(&mut self, target: impl Into<SeekTarget>) -> &mut Self {
        if let Err(e) = self.timeline.tween_to(target) {
            self.warn(format!("tween ignored: {e}"));
        }
        self
    }

    /// Feed `dt` seconds of the external frame clock.
    pub fn advance(&mut self, dt: Secs) -> &mut Self {
        self.timeline.advance(&mut self.doc, dt);
        self
    }

    /// Tear down the timeline. Safe to call repeatedly.
    pub fn kill(&mut self) {
        self.timeline.kill();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/core.rs"]
mod tests;
