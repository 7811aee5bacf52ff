//! Shared constants for the dragdrop crate.

// ── Registry ────────────────────────────────────────────────────

/// Channel used when the caller does not name one.
pub const DEFAULT_CHANNEL: &str = "default";

// ── Highlight ───────────────────────────────────────────────────

/// Class name a zone carries while a dragged element overlaps it.
pub const DRAG_OVER_CLASS: &str = "drag-over";

/// Class name the dragged element carries while it is floating.
pub const DRAGGING_CLASS: &str = "dragging";
