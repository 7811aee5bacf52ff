//! In-memory element used to replay scenarios without a page.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use dragdrop::{BoundingBox, Point, Surface};

/// Inline positioning captured before a drag and restored after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positioning {
    Static,
    Absolute,
}

/// An element sitting in a list slot, liftable by a drag.
#[derive(Debug, Clone)]
pub struct SimulatedElement {
    slot: BoundingBox,
    rect: BoundingBox,
    positioning: Positioning,
    placeholder: Option<(f64, f64)>,
    classes: Vec<String>,
}

impl SimulatedElement {
    /// An element laid out in flow at `slot`.
    #[must_use]
    pub fn new(slot: BoundingBox) -> Self {
        Self { slot, rect: slot, positioning: Positioning::Static, placeholder: None, classes: Vec::new() }
    }

    #[must_use]
    pub fn positioning(&self) -> Positioning {
        self.positioning
    }

    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl Surface for SimulatedElement {
    type Style = Positioning;

    fn bounding_box(&self) -> BoundingBox {
        self.rect
    }

    fn style(&self) -> Self::Style {
        self.positioning
    }

    fn restore_style(&mut self, style: Self::Style) {
        self.positioning = style;
    }

    fn insert_placeholder(&mut self, width: f64, height: f64) {
        self.placeholder = Some((width, height));
    }

    fn remove_placeholder(&mut self) {
        self.placeholder = None;
    }

    fn detach(&mut self) {
        self.positioning = Positioning::Absolute;
    }

    fn reinsert_at_placeholder(&mut self) {
        if self.placeholder.is_some() {
            self.rect = self.slot;
        }
    }

    fn move_to(&mut self, origin: Point) {
        self.rect = self.rect.moved_to(origin);
    }

    fn set_class(&mut self, class: &str, on: bool) {
        self.classes.retain(|c| c != class);
        if on {
            self.classes.push(class.to_owned());
        }
    }
}
