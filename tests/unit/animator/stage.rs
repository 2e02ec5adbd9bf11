use super::*;

const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <rect id="a" width="1" height="1"/>
  <rect id="b" width="1" height="1"/>
  <rect id="c" width="1" height="1"/>
  <path id="p" d="M0 0 L4 0"/>
</svg>"##;

fn animator() -> Animator {
    Animator::from_svg_str(SVG).unwrap()
}

fn starts(a: &Animator) -> Vec<Secs> {
    a.timeline().entries().iter().map(|e| e.span().start).collect()
}

#[test]
fn group_members_share_one_start_and_add_only_the_longest_span() {
    let mut a = animator();
    a.fade_in("#a", AnimationOptions::new().duration(1.0));
    a.group(|g| {
        assert_eq!(g.offset(), 1.0);
        g.fade_in("#b", AnimationOptions::new().duration(0.5))
            .fade_out("#c", AnimationOptions::new().duration(2.0))
            .draw_path("#p", AnimationOptions::new().duration(1.5));
    });
    assert_eq!(starts(&a), [0.0, 1.0, 1.0, 1.0]);
    assert_eq!(a.timeline().duration(), 3.0);

    a.fade_out("#a", AnimationOptions::new());
    assert_eq!(starts(&a)[4], 3.0);
}

#[test]
fn nested_groups_open_at_the_end_so_far() {
    let mut a = animator();
    a.group(|g| {
        g.fade_in("#a", AnimationOptions::new().duration(1.0));
        g.group(|inner| {
            assert_eq!(inner.offset(), 1.0);
            inner.fade_in("#b", AnimationOptions::new().duration(1.0));
        });
        g.fade_in("#c", AnimationOptions::new().duration(0.25));
    });
    assert_eq!(starts(&a), [0.0, 1.0, 0.0]);
    assert_eq!(a.timeline().duration(), 2.0);
}

#[test]
fn placement_resets_once_the_group_returns() {
    let mut a = animator();
    a.group(|g| {
        g.fade_in("#a", AnimationOptions::new().duration(1.0));
    })
    .fade_in("#b", AnimationOptions::new().duration(1.0));
    assert_eq!(starts(&a), [0.0, 1.0]);
    assert_eq!(a.placement(), Placement::Append);
}

#[test]
fn labels_and_waits_inside_a_group_use_the_timeline_end() {
    let mut a = animator();
    a.fade_in("#a", AnimationOptions::new().duration(1.0));
    a.group(|g| {
        g.fade_in("#b", AnimationOptions::new().duration(2.0))
            .add_label("inside")
            .wait(0.5);
    });
    assert_eq!(a.timeline().label_time("inside"), Some(3.0));
    assert_eq!(a.timeline().duration(), 3.5);
}

#[test]
fn group_misses_still_warn_once_each() {
    let mut a = animator();
    a.group(|g| {
        g.fade_in("#nope", AnimationOptions::new())
            .pulse("#nada", AnimationOptions::new());
    });
    assert_eq!(a.warnings().len(), 2);
    assert!(a.timeline().entries().is_empty());
}
