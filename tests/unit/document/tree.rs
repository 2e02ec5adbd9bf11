use super::*;

const SVG: &str = r##"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 100 100">
  <g id="n1" opacity="0.5">
    <rect id="box" x="0" y="0" width="10" height="10" fill="#ff0000"/>
    <text id="label">N<tspan>1</tspan></text>
  </g>
  <use id="ref" xlink:href="#box"/>
</svg>"##;

fn doc() -> SvgDocument {
    SvgDocument::parse(SVG).unwrap()
}

fn by_id(doc: &SvgDocument, id: &str) -> NodeId {
    std::iter::once(doc.root())
        .chain(doc.descendants(doc.root()))
        .find(|n| doc.attr(*n, "id") == Some(id))
        .unwrap()
}

#[test]
fn parses_root_and_preorder_descendants() {
    let d = doc();
    assert_eq!(d.tag(d.root()), Some("svg"));
    let tags: Vec<_> = d
        .descendants(d.root())
        .into_iter()
        .map(|n| d.tag(n).unwrap().to_owned())
        .collect();
    assert_eq!(tags, ["g", "rect", "text", "tspan", "use"]);
}

#[test]
fn keeps_xlink_prefix_on_attributes() {
    let d = doc();
    let r = by_id(&d, "ref");
    assert_eq!(d.attr(r, "xlink:href"), Some("#box"));
}

#[test]
fn text_content_concatenates_descendants_and_can_be_replaced() {
    let mut d = doc();
    let label = by_id(&d, "label");
    assert_eq!(d.text_content(label), "N1");

    d.set_text_content(label, "N7");
    assert_eq!(d.text_content(label), "N7");
    assert_eq!(d.element_children(label).count(), 0);

    d.set_text_content(label, "");
    assert_eq!(d.text_content(label), "");
}

#[test]
fn repeated_text_replacement_reuses_the_text_node() {
    let mut d = doc();
    let label = by_id(&d, "label");
    d.set_text_content(label, "first");
    let len = d.arena_len();
    for i in 0..100 {
        d.set_text_content(label, if i % 2 == 0 { "" } else { "N2" });
    }
    assert_eq!(d.arena_len(), len);
    assert_eq!(d.text_content(label), "N2");
}

#[test]
fn property_lookup_falls_back_to_attribute_then_default() {
    let mut d = doc();
    let g = by_id(&d, "n1");
    let rect = by_id(&d, "box");

    assert_eq!(d.get(g, Prop::Opacity), Value::Number(0.5));
    assert_eq!(d.get(rect, Prop::Opacity), Value::Number(1.0));
    assert_eq!(d.get(rect, Prop::X), Value::Number(0.0));
    assert_eq!(d.get(rect, Prop::Fill).to_string(), "#ff0000");

    d.apply(rect, Prop::Opacity, Value::Number(0.25));
    assert_eq!(d.get(rect, Prop::Opacity), Value::Number(0.25));
    assert_eq!(d.overrides(rect).count(), 1);
}

#[test]
fn inline_style_outranks_the_presentation_attribute() {
    let mut d = SvgDocument::parse(
        r##"<svg xmlns="http://www.w3.org/2000/svg">
  <rect id="r" fill="#00ff00" opacity="0.5" style="opacity: 0.8; fill:#ff0000; opacity:0.9"/>
</svg>"##,
    )
    .unwrap();
    let r = by_id(&d, "r");
    assert_eq!(d.style_value(r, "fill"), Some("#ff0000"));
    assert_eq!(d.get(r, Prop::Opacity), Value::Number(0.9));
    assert_eq!(d.get(r, Prop::Fill).to_string(), "#ff0000");
    assert_eq!(d.get(r, Prop::Stroke).to_string(), "none");

    d.apply(r, Prop::Opacity, Value::Number(0.1));
    assert_eq!(d.get(r, Prop::Opacity), Value::Number(0.1));
}

#[test]
fn siblings_skip_text_nodes() {
    let d = doc();
    let g = by_id(&d, "n1");
    let r = by_id(&d, "ref");
    assert_eq!(d.prev_sibling_element(r), Some(g));
    assert_eq!(d.prev_sibling_element(g), None);
}

#[test]
fn rejects_markup_without_svg() {
    assert!(SvgDocument::parse("<html/>").is_err());
    assert!(SvgDocument::parse("<svg").is_err());
}

#[test]
fn empty_document_is_a_lone_svg_root() {
    let d = SvgDocument::empty();
    assert_eq!(d.tag(d.root()), Some("svg"));
    assert!(d.descendants(d.root()).is_empty());
}
