use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::animation::ease::Ease;
use crate::animation::props::PropertyMap;
use crate::animation::value::{Prop, Value};
use crate::document::tree::NodeId;

const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <rect id="a" width="4" height="4" fill="#ff0000"/>
  <rect id="b" width="4" height="4"/>
</svg>"##;

fn fixture() -> (SvgDocument, NodeId, NodeId) {
    let doc = SvgDocument::parse(SVG).unwrap();
    let kids: Vec<NodeId> = doc.element_children(doc.root()).collect();
    let (a, b) = (kids[0], kids[1]);
    (doc, a, b)
}

fn fade(target: NodeId, to: f64) -> Payload {
    Payload::Tween {
        targets: vec![target],
        props: PropertyMap::new().opacity(to),
    }
}

fn linear(d: f64) -> Timing {
    Timing::new(d).ease(Ease::Linear)
}

fn opacity(doc: &SvgDocument, n: NodeId) -> f64 {
    doc.get(n, Prop::Opacity).as_number().unwrap()
}

fn counter() -> (Rc<Cell<u32>>, Callback) {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    (hits, Rc::new(move || h.set(h.get() + 1)))
}

#[test]
fn append_follows_the_end_and_absolute_placement_overlaps() {
    let (_, a, b) = fixture();
    let mut tl = Timeline::new();
    let s1 = tl
        .enqueue(fade(a, 0.0), linear(1.0), Placement::Append, Callbacks::default())
        .unwrap();
    let s2 = tl
        .enqueue(fade(b, 0.0), linear(0.5), Placement::Append, Callbacks::default())
        .unwrap();
    let s3 = tl
        .enqueue(fade(b, 1.0), linear(0.3), Placement::At(0.2), Callbacks::default())
        .unwrap();
    assert_eq!(s1, Span { start: 0.0, end: 1.0 });
    assert_eq!(s2, Span { start: 1.0, end: 1.5 });
    assert_eq!(s3.start, 0.2);
    assert_eq!(tl.duration(), 1.5);

    let s4 = tl
        .enqueue(
            fade(a, 1.0),
            linear(1.0).delay(0.25),
            Placement::Append,
            Callbacks::default(),
        )
        .unwrap();
    assert_eq!(s4.start, 1.75);
    assert_eq!(tl.duration(), 2.75);
}

#[test]
fn empty_tweens_are_not_scheduled() {
    let mut tl = Timeline::new();
    let payload = Payload::Tween {
        targets: Vec::new(),
        props: PropertyMap::new().opacity(1.0),
    };
    assert!(
        tl.enqueue(payload, linear(1.0), Placement::Append, Callbacks::default())
            .is_none()
    );
    assert!(tl.entries().is_empty());
}

#[test]
fn labels_keep_their_time_and_duplicates_resolve_to_the_latest() {
    let (_, a, _) = fixture();
    let mut tl = Timeline::new();
    assert_eq!(tl.add_label("start"), 0.0);
    tl.enqueue(fade(a, 0.0), linear(1.0), Placement::Append, Callbacks::default());
    tl.add_label("step");
    tl.enqueue(fade(a, 1.0), linear(1.0), Placement::Append, Callbacks::default());
    tl.add_label("step");

    let all: Vec<_> = tl.labels().collect();
    assert_eq!(all, [("start", 0.0), ("step", 1.0), ("step", 2.0)]);
    assert_eq!(tl.label_time("step"), Some(2.0));
    assert_eq!(tl.label_time("missing"), None);
}

#[test]
fn seek_jumps_clamps_and_rejects_unknown_labels() {
    let (mut doc, a, _) = fixture();
    let mut tl = Timeline::new();
    tl.enqueue(fade(a, 0.0), linear(1.0), Placement::Append, Callbacks::default());
    tl.add_label("end");

    tl.seek(&mut doc, 0.5).unwrap();
    assert!((opacity(&doc, a) - 0.5).abs() < 1e-9);
    tl.seek(&mut doc, 10.0).unwrap();
    assert_eq!(tl.time(), 1.0);
    tl.seek(&mut doc, "end").unwrap();
    assert_eq!(opacity(&doc, a), 0.0);
    assert!(tl.seek(&mut doc, "nope").is_err());
    assert_eq!(tl.state(), Playback::Paused);
}

#[test]
fn show_style_entry_round_trips_when_reversed() {
    let (mut doc, a, b) = fixture();
    let before_a = doc.get(a, Prop::Fill);
    let before_b = doc.get(b, Prop::Fill);

    let mut tl = Timeline::new();
    tl.enqueue(
        Payload::Tween {
            targets: vec![a, b],
            props: PropertyMap::new().fill("#00ff00"),
        },
        Timing::new(0.01),
        Placement::Append,
        Callbacks::default(),
    );
    tl.seek(&mut doc, 0.01).unwrap();
    assert_eq!(doc.get(a, Prop::Fill).to_string(), "#00ff00");

    tl.reverse();
    tl.advance(&mut doc, 1.0);
    assert_eq!(tl.time(), 0.0);
    assert_eq!(doc.get(a, Prop::Fill), before_a);
    assert_eq!(doc.get(b, Prop::Fill), before_b);
    assert_eq!(tl.state(), Playback::Paused);
}

#[test]
fn backward_jump_restores_earlier_entries_last() {
    let (mut doc, a, _) = fixture();
    let mut tl = Timeline::new();
    tl.enqueue(fade(a, 0.0), linear(1.0), Placement::Append, Callbacks::default());
    tl.enqueue(fade(a, 1.0), linear(1.0), Placement::Append, Callbacks::default());
    tl.enqueue(fade(a, 0.3), linear(1.0), Placement::Append, Callbacks::default());

    tl.seek(&mut doc, 3.0).unwrap();
    assert!((opacity(&doc, a) - 0.3).abs() < 1e-9);
    tl.seek(&mut doc, 0.5).unwrap();
    assert!((opacity(&doc, a) - 0.5).abs() < 1e-9);
    tl.seek(&mut doc, 0.75).unwrap();
    assert!((opacity(&doc, a) - 0.25).abs() < 1e-9);
}

#[test]
fn playing_fires_callbacks_once_and_stops_at_the_end() {
    let (mut doc, a, _) = fixture();
    let (starts, on_start) = counter();
    let (done, on_complete) = counter();
    let mut tl = Timeline::new();
    tl.enqueue(
        fade(a, 0.0),
        linear(1.0),
        Placement::Append,
        Callbacks {
            on_start: Some(on_start),
            on_complete: Some(on_complete),
        },
    );

    tl.advance(&mut doc, 0.5);
    assert_eq!(tl.time(), 0.0);

    tl.play();
    tl.advance(&mut doc, 0.4);
    tl.advance(&mut doc, 0.4);
    assert_eq!((starts.get(), done.get()), (1, 0));
    tl.advance(&mut doc, 0.4);
    assert_eq!((starts.get(), done.get()), (1, 1));
    assert_eq!(tl.time(), 1.0);
    assert!(!tl.is_active());

    tl.reverse();
    tl.advance(&mut doc, 2.0);
    assert_eq!((starts.get(), done.get()), (1, 1));
}

#[test]
fn seeking_does_not_fire_callbacks() {
    let (mut doc, a, _) = fixture();
    let (done, on_complete) = counter();
    let mut tl = Timeline::new();
    tl.enqueue(
        fade(a, 0.0),
        linear(1.0),
        Placement::Append,
        Callbacks::on_complete(Some(on_complete)),
    );
    tl.seek(&mut doc, 1.0).unwrap();
    assert_eq!(done.get(), 0);
}

#[test]
fn tween_to_moves_at_normal_speed_and_pauses_on_arrival() {
    let (mut doc, a, _) = fixture();
    let mut tl = Timeline::new();
    tl.enqueue(fade(a, 0.0), linear(2.0), Placement::Append, Callbacks::default());
    tl.add_label("mid");
    tl.enqueue(fade(a, 1.0), linear(2.0), Placement::Append, Callbacks::default());

    tl.tween_to("mid").unwrap();
    assert_eq!(tl.state(), Playback::TweeningTo(2.0));
    tl.advance(&mut doc, 1.5);
    assert_eq!(tl.time(), 1.5);
    tl.advance(&mut doc, 1.5);
    assert_eq!(tl.time(), 2.0);
    assert_eq!(tl.state(), Playback::Paused);

    tl.tween_to(0.0).unwrap();
    tl.advance(&mut doc, 5.0);
    assert_eq!(tl.time(), 0.0);
    assert_eq!(opacity(&doc, a), 1.0);
}

#[test]
fn seek_cancels_a_pending_tween_to() {
    let (mut doc, a, _) = fixture();
    let mut tl = Timeline::new();
    tl.enqueue(fade(a, 0.0), linear(2.0), Placement::Append, Callbacks::default());
    tl.tween_to(2.0).unwrap();
    tl.seek(&mut doc, 1.0).unwrap();
    assert_eq!(tl.state(), Playback::Paused);
}

#[test]
fn restart_rewinds_then_plays() {
    let (mut doc, a, _) = fixture();
    let mut tl = Timeline::new();
    tl.enqueue(fade(a, 0.0), linear(1.0), Placement::Append, Callbacks::default());
    tl.seek(&mut doc, 1.0).unwrap();
    tl.restart(&mut doc);
    assert_eq!(tl.time(), 0.0);
    assert_eq!(opacity(&doc, a), 1.0);
    assert_eq!(tl.state(), Playback::Playing);
}

#[test]
fn kill_is_idempotent_and_silences_everything() {
    let (mut doc, a, _) = fixture();
    let (done, on_complete) = counter();
    let mut tl = Timeline::new();
    tl.enqueue(
        fade(a, 0.0),
        linear(1.0),
        Placement::Append,
        Callbacks::on_complete(Some(on_complete.clone())),
    );
    tl.play();
    tl.advance(&mut doc, 0.5);

    tl.kill();
    tl.kill();
    assert!(tl.is_killed());
    assert!(tl.entries().is_empty());
    tl.play();
    tl.advance(&mut doc, 5.0);
    assert_eq!(done.get(), 0);
    assert!(
        tl.enqueue(
            Payload::Call,
            Timing::new(0.0),
            Placement::Append,
            Callbacks::on_complete(Some(on_complete)),
        )
        .is_none()
    );
    assert!(tl.seek(&mut doc, 0.0).is_ok());
    assert_eq!(Rc::strong_count(&done), 1);
}

#[test]
fn values_written_outside_entries_are_left_alone() {
    let (mut doc, a, b) = fixture();
    let mut tl = Timeline::new();
    tl.enqueue(fade(a, 0.0), linear(1.0), Placement::Append, Callbacks::default());
    doc.apply(b, Prop::Opacity, Value::Number(0.4));
    tl.seek(&mut doc, 1.0).unwrap();
    tl.seek(&mut doc, 0.0).unwrap();
    assert_eq!(opacity(&doc, b), 0.4);
}
