//! Axis-aligned boxes and points in page coordinates.
//!
//! Every position update from the visual layer arrives as a fresh
//! [`BoundingBox`] snapshot. Boxes are `Copy` and never mutated after they
//! are produced; movement yields a new box.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in page coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with edges in page coordinates.
///
/// `right >= left` and `bottom >= top` for well-formed boxes; see
/// [`BoundingBox::is_well_formed`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    /// Build a box from its four edges.
    #[must_use]
    pub fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self { top, left, right, bottom }
    }

    /// Build a box from its top-left corner and size.
    #[must_use]
    pub fn from_origin(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { top, left, right: left + width, bottom: top + height }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The same-sized box with its top-left corner at `origin`.
    #[must_use]
    pub fn moved_to(&self, origin: Point) -> Self {
        Self::from_origin(origin.x, origin.y, self.width(), self.height())
    }

    /// All edges finite and not inverted.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        [self.top, self.left, self.right, self.bottom].iter().all(|v| v.is_finite())
            && self.right >= self.left
            && self.bottom >= self.top
    }

    /// Closed-interval overlap test; see [`intersects`].
    #[must_use]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        intersects(self, other)
    }
}

/// Whether two boxes overlap.
///
/// Boxes are disjoint only when one lies entirely left, right, above, or
/// below the other. Shared edges count as overlap. Comparison is exact.
#[must_use]
pub fn intersects(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.left > b.right || a.right < b.left || a.top > b.bottom || a.bottom < b.top)
}
