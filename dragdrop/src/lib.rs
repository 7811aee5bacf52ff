//! Drag coordination core for in-page list drag-and-drop.
//!
//! An element is lifted out of its list, follows the pointer, and may be
//! dropped on registered zones that accept or reject the payload. This crate
//! owns the part that decides *which* zone: it tracks the dragged element's
//! box as a stream, matches it against the zones registered on the drag's
//! channel, fires enter/leave exactly once per transition, and resolves the
//! drop to one zone's boolean answer. The host owns the real DOM work and
//! reaches it through the [`draggable::Surface`] and [`registry::ZoneRegion`]
//! traits.
//!
//! Everything is single-threaded: callbacks run synchronously on the thread
//! that delivers the triggering event.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | Drop-zone registry by channel and session factory ([`registry::DragCoordinator`]) |
//! | [`session`] | Per-drag enter/leave/drop state machine ([`session::DragSession`]) |
//! | [`geometry`] | Bounding boxes and the overlap test |
//! | [`stream`] | Position stream trait and the replaying [`stream::PositionFeed`] |
//! | [`subscription`] | Release-once capability shared by all exit paths |
//! | [`motion`] | Absolute pointer positions folded into deltas |
//! | [`draggable`] | Floating element model and pointer controller |
//! | [`highlight`] | Drag-over flag for zone hosts |
//! | [`error`] | Usage errors |
//! | [`consts`] | Shared constants (default channel, class names) |

pub mod consts;
pub mod draggable;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod motion;
pub mod registry;
pub mod session;
pub mod stream;
pub mod subscription;

pub use draggable::{Button, DragController, Draggable, Release, ReleaseError, Surface};
pub use error::DragError;
pub use geometry::{BoundingBox, Point, intersects};
pub use highlight::{HighlightChange, ZoneHighlight};
pub use registry::{DragCoordinator, DropZone, FnRegion, Registration, ZoneId, ZoneRegion};
pub use session::{DragSession, SessionOptions, SessionState};
pub use stream::{PositionFeed, PositionSink, PositionStream};
pub use subscription::Subscription;
