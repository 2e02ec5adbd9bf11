use super::*;

#[test]
fn hex_colors_round_trip_through_display() {
    for s in ["#2f9e44", "#70bafb", "#000000"] {
        assert_eq!(Color::parse_hex(s).unwrap().to_string(), s);
    }
    assert_eq!(Color::parse_hex("#fff").unwrap(), Color::rgba(1.0, 1.0, 1.0, 1.0));
    assert_eq!(Color::parse_hex("#00000080").unwrap().to_string(), "#00000080");
    assert!(Color::parse_hex("red").is_none());
    assert!(Color::parse_hex("#12345").is_none());
}

#[test]
fn parse_for_picks_shape_by_property() {
    assert_eq!(Value::parse_for(Prop::Opacity, "0.5"), Value::Number(0.5));
    assert_eq!(
        Value::parse_for(Prop::Fill, "#ff0000"),
        Value::Color(Color::rgba(1.0, 0.0, 0.0, 1.0))
    );
    assert_eq!(
        Value::parse_for(Prop::Fill, "none"),
        Value::Keyword("none".to_owned())
    );
    assert_eq!(
        Value::parse_for(Prop::Visibility, "hidden"),
        Value::Keyword("hidden".to_owned())
    );
}

#[test]
fn numbers_blend_and_keywords_switch_at_end() {
    assert_eq!(
        interpolate(Prop::Opacity, &Value::Number(0.0), &Value::Number(1.0), 0.25),
        Value::Number(0.25)
    );
    let none = Value::Keyword("none".to_owned());
    let red = Value::Color(Color::rgba(1.0, 0.0, 0.0, 1.0));
    assert_eq!(interpolate(Prop::Fill, &none, &red, 0.5), none);
    assert_eq!(interpolate(Prop::Fill, &none, &red, 1.0), red);
}

#[test]
fn visibility_turns_visible_as_soon_as_tween_starts() {
    let hidden = Value::Keyword("hidden".to_owned());
    let visible = Value::Keyword("visible".to_owned());
    assert_eq!(interpolate(Prop::Visibility, &hidden, &visible, 0.0), hidden);
    assert_eq!(interpolate(Prop::Visibility, &hidden, &visible, 0.01), visible);
    assert_eq!(interpolate(Prop::Visibility, &visible, &hidden, 0.99), visible);
    assert_eq!(interpolate(Prop::Visibility, &visible, &hidden, 1.0), hidden);
}

#[test]
fn colors_blend_componentwise() {
    let black = Value::Color(Color::BLACK);
    let white = Value::Color(Color::rgba(1.0, 1.0, 1.0, 1.0));
    let Value::Color(mid) = interpolate(Prop::Fill, &black, &white, 0.5) else {
        panic!("expected color");
    };
    assert!((mid.r - 0.5).abs() < 1e-9);
    assert!((mid.a - 1.0).abs() < 1e-9);
}

#[test]
fn prop_names_accept_both_spellings() {
    assert_eq!(Prop::from_name("strokeDashoffset"), Some(Prop::StrokeDashoffset));
    assert_eq!(Prop::from_name("stroke-dashoffset"), Some(Prop::StrokeDashoffset));
    assert_eq!(Prop::from_name("autoAlpha"), None);
    assert_eq!(Prop::StrokeDasharray.attr_name(), Some("stroke-dasharray"));
    assert_eq!(Prop::Scale.attr_name(), None);
}

#[test]
fn number_formatting_drops_float_noise() {
    assert_eq!(format_number(0.1 + 0.2), "0.3");
    assert_eq!(format_number(12.0), "12");
    assert_eq!(format_number(-0.00001), "0");
}
