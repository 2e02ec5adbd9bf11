use super::*;
use crate::document::select::select;

const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <path id="p" d="M0 0 L30 0 L30 40"/>
  <line id="l" x1="0" y1="0" x2="3" y2="4"/>
  <polyline id="pl" points="0,0 10,0 10,10"/>
  <polygon id="pg" points="0,0 10,0 10,10"/>
  <rect id="r" x="5" y="5" width="10" height="20"/>
  <circle id="c" cx="0" cy="0" r="10"/>
  <path id="bad" d="this is not a path"/>
  <path id="empty" d=""/>
  <g id="arrow1"><g id="wrap"><line id="inner" x1="0" y1="0" x2="1" y2="0"/></g><path id="tip" d="M0 0 L1 1"/></g>
  <text id="t" x="4" y="9">hi</text>
</svg>"##;

fn node(doc: &SvgDocument, id: &str) -> NodeId {
    select(doc, doc.root(), &format!("#{id}")).unwrap()[0]
}

fn len(id: &str) -> Option<f64> {
    let doc = SvgDocument::parse(SVG).unwrap();
    total_length(&doc, node(&doc, id))
}

#[test]
fn measures_basic_shapes() {
    assert!((len("p").unwrap() - 70.0).abs() < 1e-6);
    assert!((len("l").unwrap() - 5.0).abs() < 1e-6);
    assert!((len("pl").unwrap() - 20.0).abs() < 1e-6);
    assert!((len("r").unwrap() - 60.0).abs() < 1e-6);
    assert!((len("c").unwrap() - 2.0 * std::f64::consts::PI * 10.0).abs() < 0.05);
}

#[test]
fn polygon_includes_closing_edge() {
    let expected = 20.0 + 200f64.sqrt();
    assert!((len("pg").unwrap() - expected).abs() < 1e-6);
}

#[test]
fn malformed_or_non_geometric_elements_are_unmeasurable() {
    assert!(len("bad").is_none());
    assert!(len("empty").is_none());
    assert!(len("t").is_none());
    assert!(len("arrow1").is_none());
}

#[test]
fn shaft_is_found_below_wrapper_groups() {
    let doc = SvgDocument::parse(SVG).unwrap();
    let wrap = node(&doc, "wrap");
    let inner = node(&doc, "inner");
    assert_eq!(arrow_shaft(&doc, wrap), Some(inner));
    let tip = node(&doc, "tip");
    assert_eq!(arrow_shaft(&doc, tip), Some(tip));
}

#[test]
fn bounding_boxes_union_children_and_anchor_text() {
    let doc = SvgDocument::parse(SVG).unwrap();
    let r = bounding_box(&doc, node(&doc, "r")).unwrap();
    assert_eq!(r, Rect::new(5.0, 5.0, 15.0, 25.0));
    let t = bounding_box(&doc, node(&doc, "t")).unwrap();
    assert_eq!(t, Rect::new(4.0, 9.0, 4.0, 9.0));
    let g = bounding_box(&doc, node(&doc, "arrow1")).unwrap();
    assert_eq!(g, Rect::new(0.0, 0.0, 1.0, 1.0));
}
