use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::animator::options::AnimationOptions;
use crate::animator::stage::Stage;
use crate::timeline::engine::Playback;

const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <rect id="a" width="10" height="10"/>
  <rect id="b" x="20" width="10" height="10"/>
</svg>"##;

fn counting(builds: &Rc<Cell<usize>>) -> impl Fn(&mut Animator) + use<> {
    let builds = Rc::clone(builds);
    move |a: &mut Animator| {
        builds.set(builds.get() + 1);
        a.fade_in("#a", AnimationOptions::new().duration(1.0))
            .add_label("a")
            .fade_in("#b", AnimationOptions::new().duration(1.0))
            .add_label("b");
    }
}

#[test]
fn mount_builds_the_sequence_and_auto_plays() {
    let builds = Rc::new(Cell::new(0));
    let mut host = DiagramHost::new(
        counting(&builds),
        HostOpts {
            auto_play: true,
            ..HostOpts::default()
        },
    );
    assert!(!host.is_loaded());
    assert!(host.mount(SVG).unwrap());
    assert_eq!(builds.get(), 1);
    let a = host.animator().unwrap();
    assert_eq!(a.timeline().state(), Playback::Playing);
    assert_eq!(a.total_steps(), 2);
}

#[test]
fn without_auto_play_the_timeline_waits() {
    let mut host = DiagramHost::new(counting(&Rc::new(Cell::new(0))), HostOpts::default());
    host.mount(SVG).unwrap();
    assert_eq!(
        host.animator().unwrap().timeline().state(),
        Playback::Paused
    );
}

#[test]
fn stale_tickets_are_discarded_without_building() {
    let builds = Rc::new(Cell::new(0));
    let mut host = DiagramHost::new(counting(&builds), HostOpts::default());
    let first = host.begin_load();
    let second = host.begin_load();
    assert!(second.generation() > first.generation());

    assert!(!host.finish_load(first, SVG).unwrap());
    assert_eq!(builds.get(), 0);
    assert!(host.finish_load(second, SVG).unwrap());
    assert_eq!(builds.get(), 1);
}

#[test]
fn loads_finishing_after_unmount_are_dropped() {
    let builds = Rc::new(Cell::new(0));
    let mut host = DiagramHost::new(counting(&builds), HostOpts::default());
    let ticket = host.begin_load();
    host.unmount();
    assert!(!host.finish_load(ticket, SVG).unwrap());
    assert_eq!(builds.get(), 0);
    assert!(!host.is_loaded());
}

#[test]
fn unmount_kills_and_is_repeatable() {
    let mut host = DiagramHost::new(counting(&Rc::new(Cell::new(0))), HostOpts::default());
    host.mount(SVG).unwrap();
    host.unmount();
    host.unmount();
    assert!(!host.is_loaded());
    assert!(!host.is_mounted());
    assert!(!host.can_go_next());
    assert!(!host.next());
}

#[test]
fn next_walks_the_steps_until_none_remain() {
    let mut host = DiagramHost::new(counting(&Rc::new(Cell::new(0))), HostOpts::default());
    host.mount(SVG).unwrap();
    assert!(host.can_go_next());
    assert!(host.next());
    assert!(!host.next());
    assert!(!host.can_go_next());

    host.tick(5.0);
    let a = host.animator().unwrap();
    assert_eq!(a.current_step(), 1);
    assert_eq!(a.timeline().time(), 2.0);
}

#[test]
fn replay_rebuilds_from_the_last_markup() {
    let builds = Rc::new(Cell::new(0));
    let mut host = DiagramHost::new(counting(&builds), HostOpts::default());
    assert!(!host.replay().unwrap());

    host.mount(SVG).unwrap();
    host.next();
    host.tick(5.0);
    assert!(host.replay().unwrap());
    assert_eq!(builds.get(), 2);
    let a = host.animator().unwrap();
    assert_eq!(a.current_step(), -1);
    assert_eq!(a.timeline().time(), 0.0);
    assert!(host.can_go_next());
}

#[test]
fn controls_follow_the_options() {
    let mut plain = DiagramHost::new(counting(&Rc::new(Cell::new(0))), HostOpts::default());
    plain.mount(SVG).unwrap();
    assert!(plain.controls().is_empty());

    let mut stepped = DiagramHost::new(
        counting(&Rc::new(Cell::new(0))),
        HostOpts {
            show_controls: true,
            show_restart_button: true,
            ..HostOpts::default()
        },
    );
    assert!(stepped.controls().is_empty());
    stepped.mount(SVG).unwrap();
    assert_eq!(stepped.controls(), [Control::Reset, Control::Next]);

    let mut replayable = DiagramHost::new(
        counting(&Rc::new(Cell::new(0))),
        HostOpts {
            show_restart_button: true,
            ..HostOpts::default()
        },
    );
    replayable.mount(SVG).unwrap();
    assert_eq!(replayable.controls(), [Control::Replay]);
}

#[test]
fn scripts_drive_a_host() {
    let script = Script::from_json(
        r##"{ "steps": [ { "op": "fade_in", "target": "#a" }, { "op": "label", "name": "one" } ] }"##,
    )
    .unwrap();
    let mut host = DiagramHost::new(script, HostOpts::default());
    host.mount(SVG).unwrap();
    assert_eq!(host.animator().unwrap().total_steps(), 1);
}

#[test]
fn malformed_markup_is_a_parse_error() {
    let mut host = DiagramHost::new(counting(&Rc::new(Cell::new(0))), HostOpts::default());
    let err = host.mount("<svg").unwrap_err();
    assert!(err.to_string().starts_with("parse error:"));
    assert!(!host.is_loaded());
}

#[test]
fn host_opts_deserialize_with_defaults() {
    let opts: HostOpts = serde_json::from_str(r#"{ "auto_play": true }"#).unwrap();
    assert_eq!(
        opts,
        HostOpts {
            auto_play: true,
            ..HostOpts::default()
        }
    );
}
