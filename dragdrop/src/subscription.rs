//! Release-once capability shared by every exit path.
//!
//! DESIGN
//! ======
//! Registry membership and stream subscriptions both hand back a
//! [`Subscription`]. Normal drop, cancellation, and zone self-removal all
//! funnel into the same `release()`; the teardown runs at most once and
//! later calls do nothing.

#[cfg(test)]
#[path = "subscription_test.rs"]
mod subscription_test;

use std::cell::Cell;
use std::fmt;

type Teardown = Box<dyn FnOnce()>;

/// A handle whose single operation undoes whatever produced it.
pub struct Subscription {
    teardown: Cell<Option<Teardown>>,
    released: Cell<bool>,
}

impl Subscription {
    /// Wrap a teardown closure.
    #[must_use]
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self { teardown: Cell::new(Some(Box::new(teardown))), released: Cell::new(false) }
    }

    /// A subscription with nothing to undo.
    #[must_use]
    pub fn empty() -> Self {
        Self { teardown: Cell::new(None), released: Cell::new(false) }
    }

    /// Run the teardown. Calling again is a no-op.
    pub fn release(&self) {
        self.released.set(true);
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released.get()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("released", &self.released.get()).finish()
    }
}
