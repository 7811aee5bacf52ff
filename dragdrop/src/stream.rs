//! Push-based position streams.
//!
//! DESIGN
//! ======
//! A [`PositionStream`] is anything a drag session can subscribe to for
//! bounding-box snapshots of the dragged element. [`PositionFeed`] is the
//! concrete implementation used by the draggable element: it remembers the
//! latest box, replays it to each new subscriber, and delivers every pushed
//! box to live subscribers synchronously, in push order.
//!
//! A push issued while another push is being delivered (for example from a
//! zone callback) is queued and delivered after the current one completes,
//! so subscribers always see one box at a time, in order.

#[cfg(test)]
#[path = "stream_test.rs"]
mod stream_test;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::geometry::BoundingBox;
use crate::subscription::Subscription;

/// Receiver for position updates.
pub type PositionSink = Box<dyn FnMut(BoundingBox)>;

/// Source of chronologically ordered bounding boxes for an element in motion.
pub trait PositionStream {
    /// Start delivering boxes to `sink` until the returned subscription is released.
    fn subscribe(&self, sink: PositionSink) -> Subscription;
}

struct Slot {
    id: u64,
    active: Cell<bool>,
    sink: RefCell<PositionSink>,
}

impl Slot {
    fn deliver(&self, rect: BoundingBox) {
        if !self.active.get() {
            return;
        }
        match self.sink.try_borrow_mut() {
            Ok(mut sink) => sink(rect),
            Err(_) => tracing::warn!(slot = self.id, "position sink busy; update skipped"),
        }
    }
}

struct FeedInner {
    current: Cell<BoundingBox>,
    slots: RefCell<Vec<Rc<Slot>>>,
    pending: RefCell<VecDeque<BoundingBox>>,
    delivering: Cell<bool>,
    next_id: Cell<u64>,
}

impl FeedInner {
    fn unsubscribe(&self, id: u64) {
        let mut slots = self.slots.borrow_mut();
        if let Some(idx) = slots.iter().position(|s| s.id == id) {
            let slot = slots.remove(idx);
            slot.active.set(false);
        }
    }
}

/// Replaying, single-threaded position subject.
#[derive(Clone)]
pub struct PositionFeed {
    inner: Rc<FeedInner>,
}

impl PositionFeed {
    /// Create a feed whose first replayed value is `initial`.
    #[must_use]
    pub fn new(initial: BoundingBox) -> Self {
        Self {
            inner: Rc::new(FeedInner {
                current: Cell::new(initial),
                slots: RefCell::new(Vec::new()),
                pending: RefCell::new(VecDeque::new()),
                delivering: Cell::new(false),
                next_id: Cell::new(0),
            }),
        }
    }

    /// The most recently delivered box.
    #[must_use]
    pub fn current(&self) -> BoundingBox {
        self.inner.current.get()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.slots.borrow().len()
    }

    /// Publish a new box to every live subscriber.
    pub fn push(&self, rect: BoundingBox) {
        self.inner.pending.borrow_mut().push_back(rect);
        if self.inner.delivering.replace(true) {
            return;
        }
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(rect) = next else { break };
            self.inner.current.set(rect);
            // Snapshot so sinks may subscribe or release while we iterate.
            let slots: Vec<Rc<Slot>> = self.inner.slots.borrow().clone();
            for slot in slots {
                slot.deliver(rect);
            }
        }
        self.inner.delivering.set(false);
    }
}

impl PositionStream for PositionFeed {
    fn subscribe(&self, sink: PositionSink) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let slot = Rc::new(Slot { id, active: Cell::new(true), sink: RefCell::new(sink) });
        self.inner.slots.borrow_mut().push(Rc::clone(&slot));
        slot.deliver(self.inner.current.get());

        let weak: Weak<FeedInner> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            slot.active.set(false);
            if let Some(inner) = weak.upgrade() {
                inner.unsubscribe(id);
            }
        })
    }
}
