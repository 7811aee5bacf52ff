//! Floating element model and the press/move/release controller.
//!
//! DESIGN
//! ======
//! [`Draggable`] drives the visual relocation layer through the [`Surface`]
//! trait: on start it records the element's style and box, leaves a
//! same-sized placeholder in the layout, floats the element at its original
//! corner, and seeds a [`PositionFeed`] with the floating box. Each pointer
//! move shifts the element by the pointer delta and pushes the new box, which
//! is what a [`DragSession`] subscribes to.
//!
//! [`DragController`] is the glue a host wires pointer events into: primary
//! press begins a drag on its coordinator channel, release drops the session
//! and then either completes (accepted) or cancels (rejected) the element.

#[cfg(test)]
#[path = "draggable_test.rs"]
mod draggable_test;

use std::fmt;
use std::rc::Rc;

use crate::consts::DRAGGING_CLASS;
use crate::error::DragError;
use crate::geometry::{BoundingBox, Point};
use crate::motion::{MotionTracker, PointerMotion};
use crate::registry::DragCoordinator;
use crate::session::DragSession;
use crate::stream::PositionFeed;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// The visual layer under a dragged element.
pub trait Surface {
    /// Inline style snapshot restored when the drag ends.
    type Style;

    /// Current box of the element in page coordinates.
    fn bounding_box(&self) -> BoundingBox;
    fn style(&self) -> Self::Style;
    fn restore_style(&mut self, style: Self::Style);
    /// Reserve the element's layout slot with an empty box of this size.
    fn insert_placeholder(&mut self, width: f64, height: f64);
    fn remove_placeholder(&mut self);
    /// Take the element out of normal flow so it can follow the pointer.
    fn detach(&mut self);
    /// Put the element back into the slot held by the placeholder.
    fn reinsert_at_placeholder(&mut self);
    /// Position the floating element's top-left corner.
    fn move_to(&mut self, origin: Point);
    fn set_class(&mut self, class: &str, on: bool);
}

// =============================================================================
// DRAGGABLE
// =============================================================================

/// An element lifted out of layout and following the pointer.
pub struct Draggable<S: Surface> {
    surface: S,
    original_style: S::Style,
    original_box: BoundingBox,
    position: Point,
    tracker: MotionTracker,
    feed: PositionFeed,
}

impl<S: Surface> Draggable<S> {
    /// Lift the element. `pointer` is where the press happened, so the
    /// first move is measured from there.
    pub fn start(mut surface: S, pointer: Point) -> Self {
        let original_style = surface.style();
        let original_box = surface.bounding_box();

        surface.insert_placeholder(original_box.width(), original_box.height());
        surface.detach();
        surface.set_class(DRAGGING_CLASS, true);
        let position = original_box.origin();
        surface.move_to(position);

        let mut tracker = MotionTracker::new();
        tracker.update(pointer);
        let feed = PositionFeed::new(surface.bounding_box());

        Self { surface, original_style, original_box, position, tracker, feed }
    }

    /// Stream of the element's boxes, starting with the lifted position.
    #[must_use]
    pub fn positions(&self) -> &PositionFeed {
        &self.feed
    }

    /// Current top-left corner of the floating element.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Box the element occupied before it was lifted.
    #[must_use]
    pub fn original_box(&self) -> BoundingBox {
        self.original_box
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Follow the pointer to `pointer` and publish the element's new box.
    pub fn pointer_move(&mut self, pointer: Point) -> PointerMotion {
        let motion = self.tracker.update(pointer);
        self.position = Point::new(self.position.x + motion.dx, self.position.y + motion.dy);
        self.surface.move_to(self.position);
        self.feed.push(self.surface.bounding_box());
        motion
    }

    /// The drop was accepted; the zone now owns placement. Drops the
    /// placeholder and restores the element's style.
    pub fn complete(self) -> S {
        self.finish(false)
    }

    /// The drop was rejected or aborted; return the element to its slot.
    pub fn cancel(self) -> S {
        self.finish(true)
    }

    fn finish(self, reinsert: bool) -> S {
        let Self { mut surface, original_style, .. } = self;
        if reinsert {
            surface.reinsert_at_placeholder();
        }
        surface.remove_placeholder();
        surface.restore_style(original_style);
        surface.set_class(DRAGGING_CLASS, false);
        surface
    }
}

impl<S: Surface> fmt::Debug for Draggable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draggable")
            .field("original_box", &self.original_box)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Result of releasing the pointer over a drag.
#[derive(Debug)]
pub struct Release<S> {
    /// Whether a zone accepted the payload.
    pub accepted: bool,
    /// The element's surface, handed back after restoration.
    pub surface: S,
}

/// A release whose session had already been resolved elsewhere. The element
/// is still returned to its slot and handed back.
#[derive(Debug)]
pub struct ReleaseError<S> {
    pub error: DragError,
    pub surface: S,
}

impl<S> fmt::Display for ReleaseError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl<S: fmt::Debug> std::error::Error for ReleaseError<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

struct ActiveDrag<P, E, S: Surface> {
    draggable: Draggable<S>,
    session: DragSession<P, E>,
}

/// Wires pointer press/move/release into a coordinator channel.
pub struct DragController<P, E, S: Surface> {
    coordinator: Rc<DragCoordinator<P, E>>,
    channel: String,
    active: Option<ActiveDrag<P, E, S>>,
}

impl<P: 'static, E: 'static, S: Surface> DragController<P, E, S> {
    #[must_use]
    pub fn new(coordinator: Rc<DragCoordinator<P, E>>, channel: &str) -> Self {
        Self { coordinator, channel: channel.to_owned(), active: None }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Session of the drag in progress.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession<P, E>> {
        self.active.as_ref().map(|a| &a.session)
    }

    /// Floating element of the drag in progress.
    #[must_use]
    pub fn draggable(&self) -> Option<&Draggable<S>> {
        self.active.as_ref().map(|a| &a.draggable)
    }

    /// Begin dragging `surface` on a primary press.
    ///
    /// Returns the surface back when the press does not start a drag
    /// (non-primary button, or a drag already in progress).
    ///
    /// # Errors
    ///
    /// Hands `surface` back as `Err` when no drag was started.
    pub fn press(&mut self, button: Button, pointer: Point, surface: S, element: E) -> Result<(), S> {
        if button != Button::Primary || self.active.is_some() {
            return Err(surface);
        }
        let draggable = Draggable::start(surface, pointer);
        let session = self.coordinator.begin_drag_in(&self.channel, draggable.positions(), element);
        self.active = Some(ActiveDrag { draggable, session });
        Ok(())
    }

    /// Move the floating element. Returns `false` when nothing is being dragged.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                active.draggable.pointer_move(pointer);
                true
            }
            None => false,
        }
    }

    /// Drop `payload` where the element is. `Ok(None)` when nothing is
    /// being dragged.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError`] carrying [`DragError::InvalidState`] if the
    /// session was resolved behind the controller's back (for example by a
    /// zone callback). The element is returned to its slot and handed back
    /// inside the error.
    pub fn release(&mut self, payload: P) -> Result<Option<Release<S>>, ReleaseError<S>> {
        let Some(ActiveDrag { draggable, session }) = self.active.take() else {
            return Ok(None);
        };
        match session.drop_payload(payload) {
            Ok(true) => Ok(Some(Release { accepted: true, surface: draggable.complete() })),
            Ok(false) => Ok(Some(Release { accepted: false, surface: draggable.cancel() })),
            Err(error) => Err(ReleaseError { error, surface: draggable.cancel() }),
        }
    }

    /// Abandon the drag in progress, returning the element to its slot.
    pub fn abort(&mut self) -> Option<S> {
        let ActiveDrag { draggable, session } = self.active.take()?;
        session.cancel();
        Some(draggable.cancel())
    }
}
