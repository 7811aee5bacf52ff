//! Pointer movement as per-event deltas.
//!
//! The pointer reports absolute positions; the floating element is moved by
//! the difference between consecutive positions. The first event of a drag
//! has no predecessor and therefore a zero delta.

#[cfg(test)]
#[path = "motion_test.rs"]
mod motion_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// One pointer event with the movement since the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerMotion {
    /// Absolute pointer position.
    pub absolute: Point,
    /// Horizontal movement since the previous event.
    pub dx: f64,
    /// Vertical movement since the previous event.
    pub dy: f64,
}

/// Incremental delta computation over a live pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionTracker {
    last: Option<Point>,
}

impl MotionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the next absolute position into a motion.
    pub fn update(&mut self, absolute: Point) -> PointerMotion {
        let (dx, dy) = self.last.map_or((0.0, 0.0), |prev| (absolute.x - prev.x, absolute.y - prev.y));
        self.last = Some(absolute);
        PointerMotion { absolute, dx, dy }
    }

    /// Forget the previous position; the next event has a zero delta again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Turn a sequence of absolute positions into motions.
pub fn track<I>(positions: I) -> impl Iterator<Item = PointerMotion>
where
    I: IntoIterator<Item = Point>,
{
    positions.into_iter().scan(MotionTracker::new(), |tracker, p| Some(tracker.update(p)))
}
