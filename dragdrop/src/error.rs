//! Errors raised for collaborator integration bugs.
//!
//! Missing a zone, dragging on an unknown channel, or a rejected drop are
//! ordinary outcomes reported as `bool`/`Option`. Only misuse of the API
//! lands here.

/// Programmer-usage errors from the registry and drag sessions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    /// The session already resolved through `drop_payload`.
    #[error("drag session already finalized; drop may be called only once")]
    InvalidState,
    /// A zone was registered with an unusable region or channel.
    #[error("invalid drop zone registration: {0}")]
    InvalidRegistration(String),
}
