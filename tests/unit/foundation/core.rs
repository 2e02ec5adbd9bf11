use super::*;

#[test]
fn slide_offsets_point_away_from_destination() {
    assert_eq!(SlideFrom::Left.offset(100.0), Vec2::new(-100.0, 0.0));
    assert_eq!(SlideFrom::Right.offset(100.0), Vec2::new(100.0, 0.0));
    assert_eq!(SlideFrom::Top.offset(100.0), Vec2::new(0.0, -100.0));
    assert_eq!(SlideFrom::Bottom.offset(100.0), Vec2::new(0.0, 100.0));
}

#[test]
fn numbers_accept_px_suffix() {
    assert_eq!(parse_number("12"), Some(12.0));
    assert_eq!(parse_number(" 4.5px "), Some(4.5));
    assert_eq!(parse_number("auto"), None);
}

#[test]
fn points_pair_up_and_drop_trailing_coordinate() {
    let pts = parse_points("0,0 10,0 10 10 3");
    assert_eq!(
        pts,
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0)
        ]
    );
}
