#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn rect_at(x: f64, y: f64) -> BoundingBox {
    BoundingBox::from_origin(x, y, 10.0, 10.0)
}

fn recorder() -> (Rc<RefCell<Vec<BoundingBox>>>, PositionSink) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink_seen = Rc::clone(&seen);
    (seen, Box::new(move |r| sink_seen.borrow_mut().push(r)))
}

// =============================================================
// Replay and ordering
// =============================================================

#[test]
fn subscribe_replays_current_value() {
    let feed = PositionFeed::new(rect_at(1.0, 2.0));
    let (seen, sink) = recorder();
    let _sub = feed.subscribe(sink);
    assert_eq!(*seen.borrow(), vec![rect_at(1.0, 2.0)]);
}

#[test]
fn pushes_arrive_in_order() {
    let feed = PositionFeed::new(rect_at(0.0, 0.0));
    let (seen, sink) = recorder();
    let _sub = feed.subscribe(sink);

    feed.push(rect_at(1.0, 0.0));
    feed.push(rect_at(2.0, 0.0));
    feed.push(rect_at(3.0, 0.0));

    assert_eq!(*seen.borrow(), vec![rect_at(0.0, 0.0), rect_at(1.0, 0.0), rect_at(2.0, 0.0), rect_at(3.0, 0.0)]);
    assert_eq!(feed.current(), rect_at(3.0, 0.0));
}

#[test]
fn late_subscriber_sees_latest_value_first() {
    let feed = PositionFeed::new(rect_at(0.0, 0.0));
    feed.push(rect_at(5.0, 5.0));
    let (seen, sink) = recorder();
    let _sub = feed.subscribe(sink);
    assert_eq!(*seen.borrow(), vec![rect_at(5.0, 5.0)]);
}

// =============================================================
// Release
// =============================================================

#[test]
fn released_subscription_stops_receiving() {
    let feed = PositionFeed::new(rect_at(0.0, 0.0));
    let (seen, sink) = recorder();
    let sub = feed.subscribe(sink);
    assert_eq!(feed.subscriber_count(), 1);

    sub.release();
    feed.push(rect_at(9.0, 9.0));

    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(feed.subscriber_count(), 0);
}

#[test]
fn release_twice_is_noop() {
    let feed = PositionFeed::new(rect_at(0.0, 0.0));
    let (_seen, sink) = recorder();
    let (_other_seen, other_sink) = recorder();
    let sub = feed.subscribe(sink);
    let _other = feed.subscribe(other_sink);

    sub.release();
    sub.release();

    assert_eq!(feed.subscriber_count(), 1);
}

#[test]
fn release_after_feed_dropped_is_safe() {
    let feed = PositionFeed::new(rect_at(0.0, 0.0));
    let (_seen, sink) = recorder();
    let sub = feed.subscribe(sink);
    drop(feed);
    sub.release();
    assert!(sub.is_released());
}

#[test]
fn sink_can_release_itself_mid_delivery() {
    let feed = PositionFeed::new(rect_at(0.0, 0.0));
    let holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let count = Rc::new(RefCell::new(0));

    let sink_holder = Rc::clone(&holder);
    let sink_count = Rc::clone(&count);
    let sub = feed.subscribe(Box::new(move |_| {
        *sink_count.borrow_mut() += 1;
        if *sink_count.borrow() == 2 {
            if let Some(sub) = sink_holder.borrow().as_ref() {
                sub.release();
            }
        }
    }));
    *holder.borrow_mut() = Some(sub);

    feed.push(rect_at(1.0, 1.0));
    feed.push(rect_at(2.0, 2.0));

    assert_eq!(*count.borrow(), 2);
    assert_eq!(feed.subscriber_count(), 0);
}

// =============================================================
// Re-entrant pushes
// =============================================================

#[test]
fn nested_push_is_queued_behind_current_delivery() {
    let feed = PositionFeed::new(rect_at(0.0, 0.0));
    let log = Rc::new(RefCell::new(Vec::new()));

    let first_log = Rc::clone(&log);
    let nested_feed = feed.clone();
    let _first = feed.subscribe(Box::new(move |r| {
        first_log.borrow_mut().push(("first", r.left));
        if r.left == 1.0 {
            nested_feed.push(rect_at(2.0, 0.0));
        }
    }));
    let second_log = Rc::clone(&log);
    let _second = feed.subscribe(Box::new(move |r| second_log.borrow_mut().push(("second", r.left))));
    log.borrow_mut().clear();

    feed.push(rect_at(1.0, 0.0));

    assert_eq!(*log.borrow(), vec![("first", 1.0), ("second", 1.0), ("first", 2.0), ("second", 2.0)]);
}

#[test]
fn sink_pushing_during_its_own_replay_skips_itself() {
    let feed = PositionFeed::new(rect_at(0.0, 0.0));
    let (others, other_sink) = recorder();
    let _other = feed.subscribe(other_sink);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink_seen = Rc::clone(&seen);
    let nested_feed = feed.clone();
    let _busy = feed.subscribe(Box::new(move |r| {
        sink_seen.borrow_mut().push(r);
        if r.left == 0.0 {
            nested_feed.push(rect_at(5.0, 0.0));
        }
    }));

    assert_eq!(*seen.borrow(), vec![rect_at(0.0, 0.0)]);
    assert_eq!(*others.borrow(), vec![rect_at(0.0, 0.0), rect_at(5.0, 0.0)]);
    assert_eq!(feed.current(), rect_at(5.0, 0.0));

    feed.push(rect_at(6.0, 0.0));
    assert_eq!(*seen.borrow(), vec![rect_at(0.0, 0.0), rect_at(6.0, 0.0)]);
}
