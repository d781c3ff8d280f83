use super::*;

#[test]
fn horizontal_ten_pixels_has_nine_intermediates() {
    let it = interpolate(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert_eq!(it.intermediate_count(), 9);
    assert_eq!(it.len(), 10);

    let pts: Vec<Point> = it.collect();
    for (i, p) in pts[..9].iter().enumerate() {
        assert_eq!(*p, Point::new((i + 1) as f64, 0.0));
    }
    assert_eq!(pts[9], Point::new(10.0, 0.0));
}

#[test]
fn degenerate_segment_yields_only_endpoint() {
    let p = Point::new(3.5, -2.0);
    let it = interpolate(p, p);
    assert_eq!(it.intermediate_count(), 0);
    let pts: Vec<Point> = it.collect();
    assert_eq!(pts, vec![p]);
    assert!(pts[0].x.is_finite() && pts[0].y.is_finite());
}

#[test]
fn one_pixel_step_yields_only_endpoint() {
    let pts: Vec<Point> = interpolate(Point::new(0.0, 0.0), Point::new(1.0, -1.0)).collect();
    assert_eq!(pts, vec![Point::new(1.0, -1.0)]);
}

#[test]
fn diagonal_uses_chebyshev_distance() {
    let pts: Vec<Point> = interpolate(Point::new(0.0, 0.0), Point::new(-4.0, 2.0)).collect();
    assert_eq!(pts.len(), 4);
    assert_eq!(pts[0], Point::new(-1.0, 0.5));
    assert_eq!(pts[2], Point::new(-3.0, 1.5));
    assert_eq!(pts[3], Point::new(-4.0, 2.0));
}

#[test]
fn does_not_repeat_start_point() {
    let p0 = Point::new(5.0, 5.0);
    assert!(interpolate(p0, Point::new(9.0, 5.0)).all(|p| p != p0));
}

#[test]
fn clone_restarts_sequence() {
    let it = interpolate(Point::new(0.0, 0.0), Point::new(0.0, 6.0));
    let first: Vec<Point> = it.clone().collect();
    let second: Vec<Point> = it.collect();
    assert_eq!(first, second);
}

#[test]
fn exhausted_iterator_stays_empty() {
    let mut it = interpolate(Point::new(0.0, 0.0), Point::new(3.0, 0.0));
    assert_eq!(it.by_ref().count(), 3);
    assert_eq!(it.next(), None);
    assert_eq!(it.len(), 0);
}
