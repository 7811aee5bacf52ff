//! Drag-over affordance for drop zones.
//!
//! A [`ZoneHighlight`] owns the "drag-over" flag a zone's host renders as a
//! class. [`ZoneHighlight::zone`] builds a [`DropZone`] whose enter sets the
//! flag, whose leave clears it, and whose drop clears it before deferring to
//! the host's accept decision.

#[cfg(test)]
#[path = "highlight_test.rs"]
mod highlight_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::consts::DRAG_OVER_CLASS;
use crate::registry::{DropZone, ZoneRegion};

/// Transition reported to a [`ZoneHighlight::observed_zone`] observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightChange {
    Enter,
    Leave,
}

#[derive(Debug, Default)]
struct HighlightState {
    over: Cell<bool>,
    enters: Cell<u32>,
    drops: Cell<u32>,
}

/// Shared drag-over state for one zone. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct ZoneHighlight {
    state: Rc<HighlightState>,
}

impl ZoneHighlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A dragged element currently overlaps the zone.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.over.get()
    }

    /// The class to render on the zone right now, if any.
    #[must_use]
    pub fn class(&self) -> Option<&'static str> {
        self.is_over().then_some(DRAG_OVER_CLASS)
    }

    /// How many times a drag has entered the zone.
    #[must_use]
    pub fn enter_count(&self) -> u32 {
        self.state.enters.get()
    }

    /// How many drops the zone has been asked to decide.
    #[must_use]
    pub fn drop_count(&self) -> u32 {
        self.state.drops.get()
    }

    fn enter(&self) {
        self.state.over.set(true);
        self.state.enters.set(self.state.enters.get() + 1);
    }

    fn leave(&self) {
        self.state.over.set(false);
    }

    fn settle_drop(&self) {
        self.state.over.set(false);
        self.state.drops.set(self.state.drops.get() + 1);
    }

    /// Build a drop zone over `region` that keeps this highlight in sync.
    pub fn zone<P, E, R, D>(&self, region: R, on_drop: D) -> DropZone<P, E>
    where
        R: ZoneRegion + 'static,
        D: FnMut(P, &E) -> bool + 'static,
    {
        self.observed_zone(region, on_drop, |_| {})
    }

    /// Like [`zone`](Self::zone), and also reports every enter and leave to
    /// `observer` once the flag has been updated.
    pub fn observed_zone<P, E, R, D, O>(&self, region: R, mut on_drop: D, observer: O) -> DropZone<P, E>
    where
        R: ZoneRegion + 'static,
        D: FnMut(P, &E) -> bool + 'static,
        O: FnMut(HighlightChange) + 'static,
    {
        let observer = Rc::new(RefCell::new(observer));
        let notify = move |change: HighlightChange| match observer.try_borrow_mut() {
            Ok(mut observe) => observe(change),
            Err(_) => tracing::warn!(?change, "re-entrant highlight observer skipped"),
        };
        let leave_notify = notify.clone();

        let on_enter = self.clone();
        let on_leave = self.clone();
        let on_settle = self.clone();
        DropZone::new(region, move |payload, element: &E| {
            on_settle.settle_drop();
            on_drop(payload, element)
        })
        .on_enter(move || {
            on_enter.enter();
            notify(HighlightChange::Enter);
        })
        .on_leave(move || {
            on_leave.leave();
            leave_notify(HighlightChange::Leave);
        })
    }
}
