use std::fmt::Write as _;

use crate::animation::value::{Prop, Value, format_number};
use crate::document::geometry::bounding_box;
use crate::document::tree::{NodeId, NodeKind, SvgDocument};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Serialize the document with every animated value folded back into markup.
///
/// Animated presentation properties are written as inline `style` declarations, replacing both
/// the markup's declaration and its attribute of the same name. Translation and scale are
/// prepended to the element's own `transform`, with scale pivoting on the bounding-box centre.
pub fn to_svg_string(doc: &SvgDocument) -> String {
    let mut out = String::new();
    write_node(doc, doc.root(), true, &mut out);
    out
}

fn write_node(doc: &SvgDocument, id: NodeId, is_root: bool, out: &mut String) {
    let node = doc.node(id);
    let (tag, attrs) = match &node.kind {
        NodeKind::Text(t) => {
            escape_into(t, false, out);
            return;
        }
        NodeKind::Element { tag, attrs } => (tag, attrs),
    };

    out.push('<');
    out.push_str(tag);
    if is_root {
        let _ = write!(out, " xmlns=\"{SVG_NS}\"");
        if uses_xlink(doc) {
            let _ = write!(out, " xmlns:xlink=\"{XLINK_NS}\"");
        }
    }

    let overridden = |name: &str| {
        matches!(name, "transform" | "style")
            || node
                .props
                .keys()
                .any(|p| p.attr_name() == Some(name))
    };
    for (k, v) in attrs {
        if overridden(k) {
            continue;
        }
        write_attr(k, v, out);
    }
    if let Some(style) = compose_style(doc, id) {
        write_attr("style", &style, out);
    }
    if let Some(t) = compose_transform(doc, id) {
        write_attr("transform", &t, out);
    }

    if node.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for c in &node.children {
        write_node(doc, *c, false, out);
    }
    let _ = write!(out, "</{tag}>");
}

/// Inline declarations with animated values merged over the markup's own.
fn compose_style(doc: &SvgDocument, id: NodeId) -> Option<String> {
    let node = doc.node(id);
    let animated: Vec<(&str, String)> = node
        .props
        .iter()
        .filter_map(|(p, v)| p.attr_name().map(|name| (name, v.to_string())))
        .collect();

    let mut decls: Vec<String> = doc
        .attr(id, "style")
        .map(|s| {
            simplecss::DeclarationTokenizer::from(s)
                .filter(|d| !animated.iter().any(|(name, _)| *name == d.name))
                .map(|d| {
                    if d.important {
                        format!("{}:{} !important", d.name, d.value)
                    } else {
                        format!("{}:{}", d.name, d.value)
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    decls.extend(animated.iter().map(|(name, value)| format!("{name}:{value}")));
    (!decls.is_empty()).then(|| decls.join(";"))
}

fn compose_transform(doc: &SvgDocument, id: NodeId) -> Option<String> {
    let base = doc.attr(id, "transform").map(str::trim).filter(|s| !s.is_empty());
    let num = |p: Prop| doc.node(id).props.get(&p).and_then(Value::as_number);
    let (x, y, s) = (num(Prop::X), num(Prop::Y), num(Prop::Scale));

    let mut parts = Vec::new();
    let (tx, ty) = (x.unwrap_or(0.0), y.unwrap_or(0.0));
    if tx != 0.0 || ty != 0.0 {
        parts.push(format!(
            "translate({} {})",
            format_number(tx),
            format_number(ty)
        ));
    }
    if let Some(b) = base {
        parts.push(b.to_owned());
    }
    if let Some(s) = s.filter(|s| (*s - 1.0).abs() > 1e-9) {
        let c = bounding_box(doc, id).map(|r| r.center()).unwrap_or_default();
        parts.push(format!(
            "translate({} {}) scale({}) translate({} {})",
            format_number(c.x),
            format_number(c.y),
            format_number(s),
            format_number(-c.x),
            format_number(-c.y)
        ));
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn uses_xlink(doc: &SvgDocument) -> bool {
    doc.descendants(doc.root()).into_iter().any(|n| match &doc.node(n).kind {
        NodeKind::Element { attrs, .. } => attrs.iter().any(|(k, _)| k.starts_with("xlink:")),
        NodeKind::Text(_) => false,
    })
}

fn write_attr(name: &str, value: &str, out: &mut String) {
    let _ = write!(out, " {name}=\"");
    escape_into(value, true, out);
    out.push('"');
}

fn escape_into(s: &str, attr: bool, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/write.rs"]
mod tests;
