use super::*;

#[test]
fn bounds_of_points_covers_all() {
    let r = bounds_of_points([
        Point::new(1.0, 5.0),
        Point::new(-2.0, 3.0),
        Point::new(4.0, -1.0),
    ])
    .unwrap();
    assert_eq!(r, Rect::new(-2.0, -1.0, 4.0, 5.0));
    assert!(bounds_of_points(std::iter::empty()).is_none());
}

#[test]
fn bounds_of_rects_and_point_sets() {
    let r = bounds_of_rects([Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(2.0, -1.0, 3.0, 0.5)])
        .unwrap();
    assert_eq!(r, Rect::new(0.0, -1.0, 3.0, 1.0));

    let a = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
    let b = [Point::new(5.0, -5.0)];
    let r = bounds_of_point_sets([&a[..], &b[..]]).unwrap();
    assert_eq!(r, Rect::new(0.0, -5.0, 5.0, 1.0));
}

#[test]
fn edge_touching_rects_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!rects_overlap(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
    assert!(!rects_overlap(a, Rect::new(10.0, 10.0, 20.0, 20.0)));
    assert!(rects_overlap(a, Rect::new(9.0, 9.0, 20.0, 20.0)));
    assert!(rects_overlap(a, a));
}

#[test]
fn radial_direction_uses_fallback_when_centered() {
    let c = Point::new(2.0, 2.0);
    assert_eq!(
        radial_direction(c, c, Vec2::new(0.0, -3.0)),
        Vec2::new(0.0, -1.0)
    );
    let d = radial_direction(c, Point::new(5.0, 6.0), Vec2::new(1.0, 0.0));
    assert!((d.x - 0.6).abs() < 1e-12 && (d.y - 0.8).abs() < 1e-12);
    assert_eq!(
        offset_along(c, d, 5.0),
        Point::new(5.0, 6.0)
    );
}
