use super::*;

const ALL: [Ease; 10] = [
    Ease::Linear,
    Ease::PowerIn(2),
    Ease::PowerOut(2),
    Ease::PowerInOut(2),
    Ease::SineIn,
    Ease::SineOut,
    Ease::SineInOut,
    Ease::BackIn(1.7),
    Ease::BackOut(1.7),
    Ease::BackInOut(1.7),
];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease} at 0");
        assert_eq!(ease.apply(1.0), 1.0, "{ease} at 1");
        assert_eq!(ease.apply(-0.5), 0.0, "{ease} below 0");
        assert_eq!(ease.apply(1.5), 1.0, "{ease} above 1");
    }
}

#[test]
fn monotonic_spot_check_for_non_overshooting_curves() {
    for ease in &ALL[..7] {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn back_out_overshoots_before_settling() {
    let peak = (1..100)
        .map(|i| Ease::BackOut(1.7).apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn parses_script_notation() {
    assert_eq!("none".parse::<Ease>().unwrap(), Ease::Linear);
    assert_eq!("power2.out".parse::<Ease>().unwrap(), Ease::PowerOut(2));
    assert_eq!("power3".parse::<Ease>().unwrap(), Ease::PowerOut(3));
    assert_eq!("power2.inOut".parse::<Ease>().unwrap(), Ease::PowerInOut(2));
    assert_eq!("cubic.in".parse::<Ease>().unwrap(), Ease::PowerIn(2));
    assert_eq!("sine.inOut".parse::<Ease>().unwrap(), Ease::SineInOut);
    assert_eq!("back.out(1.7)".parse::<Ease>().unwrap(), Ease::BackOut(1.7));
    assert_eq!("back.in".parse::<Ease>().unwrap(), Ease::BackIn(1.70158));
}

#[test]
fn rejects_unknown_names() {
    assert!("bounce.out".parse::<Ease>().is_err());
    assert!("back.out(1.7".parse::<Ease>().is_err());
    assert!("power2.sideways".parse::<Ease>().is_err());
}

#[test]
fn serde_uses_string_form() {
    let e: Ease = serde_json::from_value(serde_json::json!("back.out(1.7)")).unwrap();
    assert_eq!(e, Ease::BackOut(1.7));
    assert_eq!(
        serde_json::to_value(Ease::PowerInOut(2)).unwrap(),
        serde_json::json!("power2.inOut")
    );
}
