use aerohelper::geometry::{Point, hit_test, is_in_circle};

#[test]
fn hit_test_scenario() {
    let pts = [Point::new(10.0, 10.0), Point::new(20.0, 20.0)];
    assert_eq!(hit_test(&pts, Point::new(11.0, 11.0), 5.0), Some(0));
    assert_eq!(hit_test(&pts, Point::new(19.0, 21.0), 5.0), Some(1));
    assert_eq!(hit_test(&pts, Point::new(100.0, 100.0), 5.0), None);
}

#[test]
fn overlapping_points_pick_lowest_index() {
    let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.5, 0.0)];
    assert_eq!(hit_test(&pts, Point::new(0.6, 0.0), 5.0), Some(0));
}

#[test]
fn circle_is_inclusive() {
    let c = Point::new(10.0, 10.0);
    assert!(is_in_circle(Point::new(10.0, 15.0), c, 5.0));
    assert!(!is_in_circle(Point::new(14.0, 14.0), c, 5.0));
}
