#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn first_event_has_zero_delta() {
    let mut tracker = MotionTracker::new();
    let m = tracker.update(Point::new(30.0, 40.0));
    assert_eq!(m.absolute, Point::new(30.0, 40.0));
    assert_eq!((m.dx, m.dy), (0.0, 0.0));
}

#[test]
fn deltas_follow_consecutive_positions() {
    let motions: Vec<PointerMotion> =
        track([Point::new(0.0, 0.0), Point::new(5.0, -2.0), Point::new(5.0, 3.0), Point::new(1.0, 3.0)]).collect();

    let deltas: Vec<(f64, f64)> = motions.iter().map(|m| (m.dx, m.dy)).collect();
    assert_eq!(deltas, vec![(0.0, 0.0), (5.0, -2.0), (0.0, 5.0), (-4.0, 0.0)]);
}

#[test]
fn deltas_sum_to_total_displacement() {
    let path = [Point::new(10.0, 10.0), Point::new(13.0, 8.0), Point::new(20.0, 25.0), Point::new(4.0, 30.0)];
    let (sx, sy) = track(path).fold((0.0, 0.0), |(x, y), m| (x + m.dx, y + m.dy));
    assert_eq!((sx, sy), (4.0 - 10.0, 30.0 - 10.0));
}

#[test]
fn reset_starts_a_fresh_gesture() {
    let mut tracker = MotionTracker::new();
    tracker.update(Point::new(0.0, 0.0));
    tracker.update(Point::new(10.0, 10.0));
    tracker.reset();
    let m = tracker.update(Point::new(50.0, 50.0));
    assert_eq!((m.dx, m.dy), (0.0, 0.0));
}

#[test]
fn empty_input_yields_nothing() {
    assert_eq!(track(Vec::<Point>::new()).count(), 0);
}
