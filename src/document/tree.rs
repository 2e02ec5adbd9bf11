use std::collections::BTreeMap;

use crate::animation::value::{Prop, Value};
use crate::foundation::error::{SvgStepError, SvgStepResult};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Index of a node inside one [`SvgDocument`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Element or text payload of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// An element with its local tag name and attributes in source order.
    Element {
        /// Local tag name (`g`, `path`, `text`).
        tag: String,
        /// Attributes; namespaced ones keep their conventional prefix (`xlink:href`).
        attrs: Vec<(String, String)>,
    },
    /// Character data.
    Text(String),
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) props: BTreeMap<Prop, Value>,
}

/// Owned SVG tree with per-element animated property state.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Replacing an element's text detaches
/// its old children; detached nodes stay in the arena but are unreachable from the root.
#[derive(Clone, Debug)]
pub struct SvgDocument {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SvgDocument {
    /// Parse SVG text. The root is the outermost `<svg>` element.
    pub fn parse(text: &str) -> SvgStepResult<Self> {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let xml = roxmltree::Document::parse_with_options(text, opts)
            .map_err(|e| SvgStepError::parse(format!("invalid svg markup: {e}")))?;

        let svg = xml
            .root_element()
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "svg")
            .ok_or_else(|| SvgStepError::parse("document has no <svg> element"))?;

        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.import(svg, None);
        Ok(doc)
    }

    /// A bare `<svg/>` document, used by animators that are not bound to any markup.
    pub(crate) fn empty() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.push(
            NodeKind::Element {
                tag: "svg".to_owned(),
                attrs: Vec::new(),
            },
            None,
        );
        doc
    }

    fn import(&mut self, src: roxmltree::Node<'_, '_>, parent: Option<NodeId>) -> NodeId {
        let attrs = src
            .attributes()
            .map(|a| {
                let name = match a.namespace() {
                    Some(XLINK_NS) => format!("xlink:{}", a.name()),
                    Some(XML_NS) => format!("xml:{}", a.name()),
                    _ => a.name().to_owned(),
                };
                (name, a.value().to_owned())
            })
            .collect();
        let id = self.push(
            NodeKind::Element {
                tag: src.tag_name().name().to_owned(),
                attrs,
            },
            parent,
        );

        for child in src.children() {
            if child.is_element() {
                let c = self.import(child, Some(id));
                self.nodes[id.idx()].children.push(c);
            } else if let Some(text) = child.text().filter(|_| child.is_text()) {
                let c = self.push(NodeKind::Text(text.to_owned()), Some(id));
                self.nodes[id.idx()].children.push(c);
            }
        }
        id
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
            props: BTreeMap::new(),
        });
        id
    }

    /// The `<svg>` root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    /// Whether `id` addresses a node of this document.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Raw attribute value from the markup.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Parent node, `None` for the root and for detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Element children in document order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
    }

    /// Closest preceding element sibling.
    pub fn prev_sibling_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|c| self.is_element(*c))
    }

    /// All element descendants of `id` (excluding `id`) in document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.element_children(id).collect();
        stack.reverse();
        while let Some(n) = stack.pop() {
            out.push(n);
            let before = stack.len();
            stack.extend(self.element_children(n));
            stack[before..].reverse();
        }
        out
    }

    /// Whether the node is an element.
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { .. })
    }

    /// Whether the node is a `<text>` element.
    pub fn is_text_element(&self, id: NodeId) -> bool {
        self.tag(id) == Some("text")
    }

    /// Concatenated character data of all descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Text(t) => out.push_str(t),
            NodeKind::Element { .. } => {
                for c in &node.children {
                    self.collect_text(*c, out);
                }
            }
        }
    }

    /// Replace all children of `id` with a single text node.
    ///
    /// An element whose only child is already a text node has that node rewritten in place, so
    /// repeated replacements do not grow the arena.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if let [only] = self.nodes[id.idx()].children[..]
            && let NodeKind::Text(t) = &mut self.nodes[only.idx()].kind
        {
            text.clone_into(t);
            return;
        }
        let old = std::mem::take(&mut self.nodes[id.idx()].children);
        for c in old {
            self.nodes[c.idx()].parent = None;
        }
        let t = self.push(NodeKind::Text(text.to_owned()), Some(id));
        self.nodes[id.idx()].children.push(t);
    }

    #[cfg(test)]
    pub(crate) fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Value of the `name` declaration in the element's inline `style`; the last one wins.
    pub fn style_value(&self, id: NodeId, name: &str) -> Option<&str> {
        let style = self.attr(id, "style")?;
        simplecss::DeclarationTokenizer::from(style)
            .filter(|d| d.name == name)
            .last()
            .map(|d| d.value)
    }

    /// Current value of `prop`: the animated value if one was written, else the inline `style`
    /// declaration, else the presentation attribute, else the property default.
    pub fn get(&self, id: NodeId, prop: Prop) -> Value {
        if let Some(v) = self.node(id).props.get(&prop) {
            return v.clone();
        }
        prop.attr_name()
            .and_then(|name| self.style_value(id, name).or_else(|| self.attr(id, name)))
            .map(|raw| Value::parse_for(prop, raw))
            .unwrap_or_else(|| prop.default_value())
    }

    /// Write an animated value.
    pub fn apply(&mut self, id: NodeId, prop: Prop, value: Value) {
        self.nodes[id.idx()].props.insert(prop, value);
    }

    /// Animated values written so far for `id`.
    pub fn overrides(&self, id: NodeId) -> impl Iterator<Item = (Prop, &Value)> {
        self.node(id).props.iter().map(|(p, v)| (*p, v))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/tree.rs"]
mod tests;
