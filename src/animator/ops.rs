use kurbo::Point;

use crate::animation::ease::Ease;
use crate::animation::props::PropertyMap;
use crate::animation::value::{Prop, Value};
use crate::animator::core::Animator;
use crate::animator::options::AnimationOptions;
use crate::document::geometry::{arrow_shaft, total_length};
use crate::document::tree::NodeId;
use crate::foundation::core::{Secs, SlideFrom};
use crate::timeline::entry::{Callbacks, MorphRecord, Payload, Placement, Span, Timing};

const SLIDE_DISTANCE: f64 = 100.0;
const SHOW_DURATION: Secs = 0.01;
const ARROW_HEAD_FADE: Secs = 0.001;

// Operation bodies. Each one resolves its selector once, so a miss yields exactly one warning.
impl Animator {
    fn apply_now(&mut self, nodes: &[NodeId], props: &PropertyMap) {
        for n in nodes {
            for (prop, value) in props.iter() {
                self.doc.apply(*n, prop, value.clone());
            }
        }
    }

    fn tween(
        &mut self,
        targets: Vec<NodeId>,
        props: PropertyMap,
        timing: Timing,
        at: Placement,
        callbacks: Callbacks,
    ) -> Option<Span> {
        self.timeline
            .enqueue(Payload::Tween { targets, props }, timing, at, callbacks)
    }

    fn with_descendants(&self, nodes: &[NodeId]) -> Vec<NodeId> {
        let mut out = Vec::new();
        for n in nodes {
            for m in std::iter::once(*n).chain(self.doc.descendants(*n)) {
                if !out.contains(&m) {
                    out.push(m);
                }
            }
        }
        out
    }

    pub(crate) fn set_at(&mut self, selector: &str, props: &PropertyMap) {
        let nodes = self.resolve(selector);
        self.apply_now(&nodes, props);
    }

    pub(crate) fn set_text_at(&mut self, selector: &str, text: &str) {
        for n in self.resolve(selector) {
            if self.doc.is_text_element(n) {
                self.doc.set_text_content(n, text);
                self.projected_text.insert(n, text.to_owned());
            }
        }
    }

    pub(crate) fn show_at(&mut self, at: Placement, selector: &str, props: PropertyMap) {
        let nodes = self.resolve(selector);
        self.show_nodes(at, &nodes, props);
    }

    fn show_nodes(&mut self, at: Placement, nodes: &[NodeId], props: PropertyMap) {
        if nodes.is_empty() {
            return;
        }
        let targets = self.with_descendants(nodes);
        self.tween(
            targets,
            props,
            Timing::new(SHOW_DURATION),
            at,
            Callbacks::default(),
        );
    }

    pub(crate) fn fade_in_at(&mut self, at: Placement, selector: &str, opts: AnimationOptions) {
        let nodes = self.resolve(selector);
        if nodes.is_empty() {
            return;
        }
        self.apply_now(&nodes, &PropertyMap::new().opacity(0.0));
        self.tween(
            nodes,
            PropertyMap::new().opacity(1.0),
            opts.timing(0.5, Ease::PowerOut(2)),
            at,
            opts.callbacks(),
        );
    }

    pub(crate) fn fade_out_at(&mut self, at: Placement, selector: &str, opts: AnimationOptions) {
        let nodes = self.resolve(selector);
        self.tween(
            nodes,
            PropertyMap::new().opacity(0.0),
            opts.timing(0.5, Ease::PowerOut(2)),
            at,
            opts.callbacks(),
        );
    }

    pub(crate) fn scale_at(
        &mut self,
        at: Placement,
        selector: &str,
        factor: f64,
        opts: AnimationOptions,
    ) {
        let nodes = self.resolve(selector);
        self.tween(
            nodes,
            PropertyMap::new().scale(factor),
            opts.timing(0.5, Ease::BackOut(1.7)),
            at,
            opts.callbacks(),
        );
    }

    pub(crate) fn slide_in_at(
        &mut self,
        at: Placement,
        selector: &str,
        from: SlideFrom,
        opts: AnimationOptions,
    ) {
        let nodes = self.resolve(selector);
        if nodes.is_empty() {
            return;
        }
        let off = from.offset(SLIDE_DISTANCE);
        self.apply_now(&nodes, &PropertyMap::new().translate(off.x, off.y).opacity(0.0));
        self.tween(
            nodes,
            PropertyMap::new().translate(0.0, 0.0).opacity(1.0),
            opts.timing(0.8, Ease::PowerOut(3)),
            at,
            opts.callbacks(),
        );
    }

    pub(crate) fn draw_path_at(&mut self, at: Placement, selector: &str, opts: AnimationOptions) {
        let nodes = self.resolve(selector);
        self.draw_nodes(at, &nodes, opts.timing(1.0, Ease::PowerInOut(2)), opts.callbacks());
    }

    /// Retract every measurable element to its full dash length now, then tween the offset to 0.
    fn draw_nodes(
        &mut self,
        at: Placement,
        nodes: &[NodeId],
        timing: Timing,
        callbacks: Callbacks,
    ) -> Option<Span> {
        let mut drawable = Vec::new();
        for n in nodes {
            match total_length(&self.doc, *n) {
                Some(len) => {
                    self.doc.apply(*n, Prop::StrokeDasharray, Value::Number(len));
                    self.doc.apply(*n, Prop::StrokeDashoffset, Value::Number(len));
                    drawable.push(*n);
                }
                None => tracing::warn!(node = n.0, "skipping element without measurable geometry"),
            }
        }
        self.tween(
            drawable,
            PropertyMap::new().with(Prop::StrokeDashoffset, 0.0),
            timing,
            at,
            callbacks,
        )
    }

    pub(crate) fn move_to_at(
        &mut self,
        at: Placement,
        selector: &str,
        from: Option<Point>,
        to: Point,
        opts: AnimationOptions,
    ) {
        let nodes = self.resolve(selector);
        if nodes.is_empty() {
            return;
        }
        if let Some(p) = from {
            self.tween(
                nodes.clone(),
                PropertyMap::new().translate(p.x, p.y),
                Timing::new(0.0),
                at,
                Callbacks::default(),
            );
        }
        self.tween(
            nodes,
            PropertyMap::new().translate(to.x, to.y),
            opts.timing(1.0, Ease::PowerInOut(2)),
            at,
            opts.callbacks(),
        );
    }

    pub(crate) fn pulse_at(&mut self, at: Placement, selector: &str, opts: AnimationOptions) {
        let nodes = self.resolve(selector);
        let half = opts.duration.unwrap_or(0.6) / 2.0;
        let timing = Timing::new(half)
            .ease(Ease::PowerInOut(2))
            .delay(opts.delay.unwrap_or(0.0))
            .stagger(opts.stagger.unwrap_or(0.0))
            .repeat(1, true);
        self.tween(
            nodes,
            PropertyMap::new().scale(1.1),
            timing,
            at,
            opts.callbacks(),
        );
    }

    pub(crate) fn morph_text_at(
        &mut self,
        at: Placement,
        selector: &str,
        text: &str,
        opts: AnimationOptions,
    ) {
        let nodes = self.resolve(selector);
        self.morph_nodes(at, &nodes, text, &opts);
    }

    /// One morph entry per `<text>` element. The "before" side is the text the element will
    /// carry once earlier morphs finish, so consecutive morphs unwind one at a time.
    fn morph_nodes(
        &mut self,
        at: Placement,
        nodes: &[NodeId],
        text: &str,
        opts: &AnimationOptions,
    ) {
        let texts: Vec<NodeId> = nodes
            .iter()
            .copied()
            .filter(|n| self.doc.is_text_element(*n))
            .collect();
        for n in texts {
            let record = MorphRecord {
                node: n,
                before: self.projected_text(n),
                after: text.to_owned(),
            };
            let timing = Timing::new(opts.duration.unwrap_or(0.8))
                .ease(opts.ease.unwrap_or(Ease::PowerInOut(2)))
                .delay(opts.delay.unwrap_or(0.0));
            let scheduled = self.timeline.enqueue(
                Payload::Morph(record),
                timing,
                at,
                opts.callbacks(),
            );
            if scheduled.is_some() {
                self.projected_text.insert(n, text.to_owned());
            }
        }
    }

    pub(crate) fn change_text_at(
        &mut self,
        at: Placement,
        selector: &str,
        text: &str,
        fill: &str,
        duration: Option<Secs>,
    ) {
        let nodes = self.resolve(selector);
        if nodes.is_empty() {
            return;
        }
        self.morph_nodes(at, &nodes, "", &AnimationOptions::new().duration(0.0));
        self.show_nodes(at, &nodes, PropertyMap::new().fill(fill));
        let opts = AnimationOptions::new().duration(duration.unwrap_or(0.5));
        self.morph_nodes(at, &nodes, text, &opts);
    }

    fn decorations(&self, children: &[NodeId]) -> Vec<NodeId> {
        children
            .get(1..)
            .map(|rest| self.with_descendants(rest))
            .unwrap_or_default()
    }

    pub(crate) fn animate_arrow_at(
        &mut self,
        at: Placement,
        selector: &str,
        opts: AnimationOptions,
    ) {
        for group in self.resolve(selector) {
            let children: Vec<NodeId> = self.doc.element_children(group).collect();
            let Some(first) = children.first().copied() else {
                continue;
            };

            self.tween(
                vec![group],
                PropertyMap::new().auto_alpha(1.0),
                Timing::new(SHOW_DURATION),
                at,
                Callbacks::default(),
            );

            let shaft = arrow_shaft(&self.doc, first).and_then(|s| {
                self.draw_nodes(
                    at,
                    &[s],
                    opts.timing(1.0, Ease::Linear).stagger(0.0),
                    Callbacks::on_start(opts.on_start.clone()),
                )
            });
            let reveal_at = shaft.map_or(at, |s| Placement::At(s.end));

            let rest = self.decorations(&children);
            if rest.is_empty() {
                if opts.on_complete.is_some() {
                    self.timeline.enqueue(
                        Payload::Call,
                        Timing::new(0.0),
                        reveal_at,
                        Callbacks::on_complete(opts.on_complete.clone()),
                    );
                }
                continue;
            }
            self.apply_now(&rest, &PropertyMap::new().opacity(0.0));
            self.tween(
                rest,
                PropertyMap::new().opacity(1.0),
                Timing::new(0.0),
                reveal_at,
                Callbacks::on_complete(opts.on_complete.clone()),
            );
        }
    }

    pub(crate) fn unanimate_arrow_at(
        &mut self,
        at: Placement,
        selector: &str,
        opts: AnimationOptions,
    ) {
        for group in self.resolve(selector) {
            let children: Vec<NodeId> = self.doc.element_children(group).collect();
            let Some(first) = children.first().copied() else {
                continue;
            };

            let rest = self.decorations(&children);
            let heads = self.tween(
                rest,
                PropertyMap::new().opacity(0.0),
                Timing::new(ARROW_HEAD_FADE),
                at,
                Callbacks::on_start(opts.on_start.clone()),
            );
            let mut next = heads.map_or(at, |s| Placement::At(s.end));

            let shaft = arrow_shaft(&self.doc, first)
                .and_then(|s| total_length(&self.doc, s).map(|len| (s, len)));
            if let Some((s, len)) = shaft {
                let span = self.tween(
                    vec![s],
                    PropertyMap::new().with(Prop::StrokeDashoffset, len),
                    opts.timing(1.0, Ease::Linear).stagger(0.0),
                    next,
                    Callbacks::default(),
                );
                if let Some(span) = span {
                    next = Placement::At(span.end);
                }
            }

            self.tween(
                vec![group],
                PropertyMap::new().auto_alpha(0.0),
                Timing::new(SHOW_DURATION),
                next,
                Callbacks::on_complete(opts.on_complete.clone()),
            );
        }
    }

    pub(crate) fn wait_for(&mut self, secs: Secs) {
        let at = self.timeline.duration() + secs.max(0.0);
        self.timeline.enqueue(
            Payload::Call,
            Timing::new(0.0),
            Placement::At(at),
            Callbacks::default(),
        );
    }

    pub(crate) fn label(&mut self, name: &str) {
        if self.timeline.is_killed() {
            return;
        }
        let at = self.timeline.add_label(name);
        self.nav.push(name, at);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/ops.rs"]
mod tests;
