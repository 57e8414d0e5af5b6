use super::*;

fn square(side: f32) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(side, 0.0),
        Point::new(side, side),
        Point::new(0.0, side),
    ]
}

#[test]
fn color_alternates_with_depth() {
    assert_eq!(Color::from_depth(0), Color::White);
    assert_eq!(Color::from_depth(1), Color::Black);
    assert_eq!(Color::from_depth(2), Color::White);
    assert_eq!(Color::from_depth(7), Color::Black);
}

#[test]
fn color_wire_values() {
    assert_eq!(Color::White.to_u8(), 0);
    assert_eq!(Color::Black.to_u8(), 1);
    assert_eq!(Color::from_u8(1).unwrap(), Color::Black);
    assert!(matches!(Color::from_u8(2), Err(VecVidError::CorruptData(_))));
}

#[test]
fn closed_points_revisits_first_point() {
    let c = Contour::new(Color::White, square(2.0));
    let closed: Vec<Point> = c.closed_points().collect();
    assert_eq!(closed.len(), 5);
    assert_eq!(closed.first(), closed.last());

    let empty = Contour::default();
    assert!(empty.is_empty());
    assert_eq!(empty.closed_points().count(), 0);
}

#[test]
fn area_is_orientation_independent() {
    let cw = Contour::new(Color::White, square(3.0));
    let mut rev = square(3.0);
    rev.reverse();
    let ccw = Contour::new(Color::White, rev);
    assert_eq!(cw.area(), 9.0);
    assert_eq!(ccw.area(), 9.0);

    let line = Contour::new(Color::Black, vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
    assert_eq!(line.area(), 0.0);
}
