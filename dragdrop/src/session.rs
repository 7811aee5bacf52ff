//! Per-drag state machine.
//!
//! DESIGN
//! ======
//! A session is `Idle` (over no zone), `Over(zone)`, or `Finalized`. On each
//! position update it finds the first still-registered zone whose live box
//! overlaps the dragged box, then:
//!
//! 1. leaves the current zone if the match changed (`on_leave`),
//! 2. enters the new match if now idle (`on_enter`),
//! 3. does nothing when the match is the current zone.
//!
//! Moving straight from zone A to zone B in one update fires `A.on_leave`
//! then `B.on_enter`. State is updated before each callback and no borrow is
//! held across it, so a callback may drop or cancel the session; the
//! remaining steps of that update are then skipped.
//!
//! A zone unregistered while current is dropped from `current` on the next
//! update (or on drop) without receiving `on_leave` or `on_drop`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::DragError;
use crate::geometry::BoundingBox;
use crate::registry::{ZoneEntry, ZoneId};
use crate::stream::PositionStream;
use crate::subscription::Subscription;

/// Behavior knobs shared by every session a coordinator starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Fire `on_leave` on the current zone when a session is cancelled.
    pub leave_on_cancel: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { leave_on_cancel: true }
    }
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not over any zone.
    Idle,
    /// Over the given zone.
    Over(ZoneId),
    /// Resolved by `drop_payload` or `cancel`; no further transitions.
    Finalized,
}

struct SessionCore<P, E> {
    channel: String,
    zones: Vec<Rc<ZoneEntry<P, E>>>,
    element: E,
    current: RefCell<Option<Rc<ZoneEntry<P, E>>>>,
    finalized: Cell<bool>,
    options: SessionOptions,
}

impl<P, E> SessionCore<P, E> {
    fn first_match(&self, rect: &BoundingBox) -> Option<Rc<ZoneEntry<P, E>>> {
        self.zones
            .iter()
            .find(|zone| zone.is_registered() && zone.bounds().intersects(rect))
            .cloned()
    }

    fn on_position(&self, rect: BoundingBox) {
        if self.finalized.get() {
            return;
        }
        let hit = self.first_match(&rect);

        let previous = self.current.borrow().clone();
        if let Some(prev) = previous {
            if !prev.is_registered() {
                self.current.replace(None);
                tracing::debug!(zone = %prev.id, channel = %self.channel, "current zone unregistered");
            } else if hit.as_ref().is_some_and(|h| Rc::ptr_eq(h, &prev)) {
                return;
            } else {
                self.current.replace(None);
                tracing::debug!(zone = %prev.id, channel = %self.channel, "drag leave");
                prev.leave();
            }
        }

        if self.finalized.get() || self.current.borrow().is_some() {
            return;
        }
        if let Some(zone) = hit {
            if !zone.is_registered() {
                return;
            }
            self.current.replace(Some(Rc::clone(&zone)));
            tracing::debug!(zone = %zone.id, channel = %self.channel, "drag enter");
            zone.enter();
        }
    }
}

/// Live handle to one in-progress drag.
///
/// Dropping the handle without calling [`drop_payload`](Self::drop_payload) or
/// [`cancel`](Self::cancel) stops position tracking but fires no callbacks.
pub struct DragSession<P, E> {
    core: Rc<SessionCore<P, E>>,
    subscription: Subscription,
}

impl<P: 'static, E: 'static> DragSession<P, E> {
    /// Bind a session to `zones` and subscribe it to `positions`.
    ///
    /// The stream's replayed starting box is processed before this returns.
    pub(crate) fn start<S>(
        channel: &str,
        zones: Vec<Rc<ZoneEntry<P, E>>>,
        element: E,
        positions: &S,
        options: SessionOptions,
    ) -> Self
    where
        S: PositionStream + ?Sized,
    {
        let core = Rc::new(SessionCore {
            channel: channel.to_owned(),
            zones,
            element,
            current: RefCell::new(None),
            finalized: Cell::new(false),
            options,
        });
        let weak = Rc::downgrade(&core);
        let subscription = positions.subscribe(Box::new(move |rect| {
            if let Some(core) = weak.upgrade() {
                core.on_position(rect);
            }
        }));
        Self { core, subscription }
    }
}

impl<P, E> DragSession<P, E> {
    /// Resolve the drag.
    ///
    /// Stops position tracking first, then returns the current zone's
    /// `on_drop(payload, element)` verbatim, or `false` when over no zone.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::InvalidState`] if the session was already
    /// dropped or cancelled.
    pub fn drop_payload(&self, payload: P) -> Result<bool, DragError> {
        if self.core.finalized.replace(true) {
            return Err(DragError::InvalidState);
        }
        self.subscription.release();

        let current = self.core.current.borrow_mut().take();
        let accepted = match current {
            Some(zone) if zone.is_registered() => zone.accept(payload, &self.core.element),
            Some(zone) => {
                tracing::debug!(zone = %zone.id, "drop over unregistered zone");
                false
            }
            None => false,
        };
        tracing::info!(channel = %self.core.channel, accepted, "drag dropped");
        Ok(accepted)
    }

    /// Abandon the drag without dropping.
    ///
    /// Stops position tracking and, when [`SessionOptions::leave_on_cancel`]
    /// is set, fires `on_leave` on the current zone. Cancelling a finalized
    /// session does nothing.
    pub fn cancel(&self) {
        if self.core.finalized.replace(true) {
            return;
        }
        self.subscription.release();

        let current = self.core.current.borrow_mut().take();
        if let Some(zone) = current {
            if self.core.options.leave_on_cancel && zone.is_registered() {
                tracing::debug!(zone = %zone.id, channel = %self.core.channel, "drag leave on cancel");
                zone.leave();
            }
        }
        tracing::info!(channel = %self.core.channel, "drag cancelled");
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.core.finalized.get() {
            return SessionState::Finalized;
        }
        match self.core.current.borrow().as_ref() {
            Some(zone) => SessionState::Over(zone.id),
            None => SessionState::Idle,
        }
    }

    /// Zone the dragged element currently overlaps, if any.
    #[must_use]
    pub fn current_zone(&self) -> Option<ZoneId> {
        match self.state() {
            SessionState::Over(id) => Some(id),
            SessionState::Idle | SessionState::Finalized => None,
        }
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.core.finalized.get()
    }

    #[must_use]
    pub fn channel(&self) -> &str {
        &self.core.channel
    }

    /// The dragged element handle.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.core.element
    }
}

impl<P, E> Drop for DragSession<P, E> {
    fn drop(&mut self) {
        self.core.finalized.set(true);
        self.subscription.release();
    }
}

impl<P, E> fmt::Debug for DragSession<P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("channel", &self.core.channel)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
