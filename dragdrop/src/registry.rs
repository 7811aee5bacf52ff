//! Drop-zone registry and drag-session factory.
//!
//! DESIGN
//! ======
//! Zones are grouped by channel name. Each channel is an ordered list of
//! shared zone entries; order decides which zone wins when several overlap
//! the dragged element (first match wins).
//!
//! A session snapshots its channel's list when the drag begins, so zones
//! registered afterwards are ignored for that drag. Removal is still seen
//! mid-drag: unregistering clears the entry's `registered` flag, and sessions
//! skip entries whose flag is down.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). No borrow is held
//! while a zone callback runs, so callbacks may register, unregister, or
//! resolve the active session.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use uuid::Uuid;

use crate::consts::DEFAULT_CHANNEL;
use crate::error::DragError;
use crate::geometry::BoundingBox;
use crate::session::{DragSession, SessionOptions};
use crate::stream::PositionStream;
use crate::subscription::Subscription;

/// Unique identifier for a registered drop zone.
pub type ZoneId = Uuid;

// =============================================================================
// REGION PROVIDERS
// =============================================================================

/// Supplies the live bounding box of a zone's target element.
///
/// Queried on every position update; implementations must not cache.
pub trait ZoneRegion {
    fn bounding_box(&self) -> BoundingBox;
}

impl ZoneRegion for BoundingBox {
    fn bounding_box(&self) -> BoundingBox {
        *self
    }
}

/// A region whose box the owner moves by writing to the shared cell.
impl ZoneRegion for Rc<Cell<BoundingBox>> {
    fn bounding_box(&self) -> BoundingBox {
        self.get()
    }
}

/// Adapts a closure into a [`ZoneRegion`].
pub struct FnRegion<F>(pub F);

impl<F> ZoneRegion for FnRegion<F>
where
    F: Fn() -> BoundingBox,
{
    fn bounding_box(&self) -> BoundingBox {
        (self.0)()
    }
}

// =============================================================================
// DROP ZONE
// =============================================================================

type EnterFn = Box<dyn FnMut()>;
type LeaveFn = Box<dyn FnMut()>;
type DropFn<P, E> = Box<dyn FnMut(P, &E) -> bool>;

/// A target region plus its enter/drop/leave callbacks, ready to register.
pub struct DropZone<P, E> {
    region: Box<dyn ZoneRegion>,
    on_enter: EnterFn,
    on_drop: DropFn<P, E>,
    on_leave: LeaveFn,
}

impl<P, E> DropZone<P, E> {
    /// A zone over `region` whose drop outcome is decided by `on_drop`.
    ///
    /// Enter and leave callbacks default to no-ops.
    #[must_use]
    pub fn new<R, D>(region: R, on_drop: D) -> Self
    where
        R: ZoneRegion + 'static,
        D: FnMut(P, &E) -> bool + 'static,
    {
        Self { region: Box::new(region), on_enter: Box::new(|| {}), on_drop: Box::new(on_drop), on_leave: Box::new(|| {}) }
    }

    /// Called when the dragged element starts overlapping this zone.
    #[must_use]
    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_enter = Box::new(f);
        self
    }

    /// Called when the dragged element stops overlapping this zone.
    #[must_use]
    pub fn on_leave<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_leave = Box::new(f);
        self
    }
}

/// A zone as held by the registry and by live sessions.
pub(crate) struct ZoneEntry<P, E> {
    pub(crate) id: ZoneId,
    region: Box<dyn ZoneRegion>,
    on_enter: RefCell<EnterFn>,
    on_drop: RefCell<DropFn<P, E>>,
    on_leave: RefCell<LeaveFn>,
    registered: Cell<bool>,
}

impl<P, E> ZoneEntry<P, E> {
    fn new(zone: DropZone<P, E>) -> Self {
        Self {
            id: Uuid::new_v4(),
            region: zone.region,
            on_enter: RefCell::new(zone.on_enter),
            on_drop: RefCell::new(zone.on_drop),
            on_leave: RefCell::new(zone.on_leave),
            registered: Cell::new(true),
        }
    }

    pub(crate) fn is_registered(&self) -> bool {
        self.registered.get()
    }

    pub(crate) fn bounds(&self) -> BoundingBox {
        self.region.bounding_box()
    }

    pub(crate) fn enter(&self) {
        match self.on_enter.try_borrow_mut() {
            Ok(mut f) => f(),
            Err(_) => tracing::warn!(zone = %self.id, "re-entrant on_enter skipped"),
        }
    }

    pub(crate) fn leave(&self) {
        match self.on_leave.try_borrow_mut() {
            Ok(mut f) => f(),
            Err(_) => tracing::warn!(zone = %self.id, "re-entrant on_leave skipped"),
        }
    }

    /// Ask the zone whether it accepts the payload. A busy callback rejects.
    pub(crate) fn accept(&self, payload: P, element: &E) -> bool {
        match self.on_drop.try_borrow_mut() {
            Ok(mut f) => f(payload, element),
            Err(_) => {
                tracing::warn!(zone = %self.id, "re-entrant on_drop rejected");
                false
            }
        }
    }
}

pub(crate) type ZoneList<P, E> = Rc<RefCell<Vec<Rc<ZoneEntry<P, E>>>>>;

// =============================================================================
// REGISTRATION HANDLE
// =============================================================================

/// Returned by registration; unregistering removes exactly this zone.
#[must_use = "dropping the handle leaves the zone registered with no way to remove it"]
pub struct Registration {
    id: ZoneId,
    subscription: Subscription,
}

impl Registration {
    #[must_use]
    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// Remove the zone from its channel. Repeated calls are no-ops.
    pub fn unregister(&self) {
        self.subscription.release();
    }

    #[must_use]
    pub fn is_unregistered(&self) -> bool {
        self.subscription.is_released()
    }

    /// Give up the typed handle, keeping only the release capability.
    pub fn into_subscription(self) -> Subscription {
        self.subscription
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("unregistered", &self.subscription.is_released())
            .finish()
    }
}

// =============================================================================
// COORDINATOR
// =============================================================================

/// Registry of drop zones by channel, and factory for [`DragSession`]s.
///
/// `P` is the payload handed to `drop_payload`; `E` is the dragged element
/// handle passed through to the winning zone. Neither is inspected here.
pub struct DragCoordinator<P, E> {
    channels: RefCell<HashMap<String, ZoneList<P, E>>>,
    options: SessionOptions,
}

impl<P: 'static, E: 'static> Default for DragCoordinator<P, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static, E: 'static> DragCoordinator<P, E> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    /// Coordinator whose sessions use `options`.
    #[must_use]
    pub fn with_options(options: SessionOptions) -> Self {
        Self { channels: RefCell::new(HashMap::new()), options }
    }

    #[must_use]
    pub fn options(&self) -> SessionOptions {
        self.options
    }

    // --- Registration ---

    /// Register `zone` on the default channel.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::InvalidRegistration`] if the zone's region is not
    /// a finite, non-inverted box.
    pub fn register_drop_zone(&self, zone: DropZone<P, E>) -> Result<Registration, DragError> {
        self.register_drop_zone_in(DEFAULT_CHANNEL, zone)
    }

    /// Register `zone` on `channel`, creating the channel if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::InvalidRegistration`] for an empty channel name or
    /// a region that is not a finite, non-inverted box.
    pub fn register_drop_zone_in(&self, channel: &str, zone: DropZone<P, E>) -> Result<Registration, DragError> {
        if channel.is_empty() {
            return Err(DragError::InvalidRegistration("channel name is empty".into()));
        }
        let bounds = zone.region.bounding_box();
        if !bounds.is_well_formed() {
            return Err(DragError::InvalidRegistration(format!("region bounding box is not usable: {bounds:?}")));
        }

        let entry = Rc::new(ZoneEntry::new(zone));
        let id = entry.id;
        let list = Rc::clone(self.channels.borrow_mut().entry(channel.to_owned()).or_default());
        list.borrow_mut().push(Rc::clone(&entry));
        tracing::debug!(zone = %id, channel, "drop zone registered");

        let weak_list: Weak<RefCell<Vec<Rc<ZoneEntry<P, E>>>>> = Rc::downgrade(&list);
        let weak_entry = Rc::downgrade(&entry);
        let channel = channel.to_owned();
        let subscription = Subscription::new(move || {
            if let Some(entry) = weak_entry.upgrade() {
                entry.registered.set(false);
            }
            if let Some(list) = weak_list.upgrade() {
                list.borrow_mut().retain(|e| e.id != id);
            }
            tracing::debug!(zone = %id, channel = %channel, "drop zone unregistered");
        });

        Ok(Registration { id, subscription })
    }

    // --- Drag ---

    /// Begin a drag on the default channel.
    pub fn begin_drag<S>(&self, positions: &S, element: E) -> DragSession<P, E>
    where
        S: PositionStream + ?Sized,
    {
        self.begin_drag_in(DEFAULT_CHANNEL, positions, element)
    }

    /// Begin a drag matched against the zones currently registered on `channel`.
    ///
    /// An unknown or empty channel is not an error; the session simply never
    /// finds a zone.
    pub fn begin_drag_in<S>(&self, channel: &str, positions: &S, element: E) -> DragSession<P, E>
    where
        S: PositionStream + ?Sized,
    {
        let zones: Vec<Rc<ZoneEntry<P, E>>> =
            self.channels.borrow().get(channel).map(|list| list.borrow().clone()).unwrap_or_default();
        tracing::debug!(channel, zones = zones.len(), "drag begun");
        DragSession::start(channel, zones, element, positions, self.options)
    }

    // --- Queries ---

    /// Number of zones currently registered on `channel`.
    #[must_use]
    pub fn zone_count(&self, channel: &str) -> usize {
        self.channels.borrow().get(channel).map_or(0, |list| list.borrow().len())
    }

    /// Names of channels that have ever had a zone registered, sorted.
    #[must_use]
    pub fn channels(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}
