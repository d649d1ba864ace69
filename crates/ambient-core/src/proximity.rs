//! Geometry for deferred activation.
//!
//! Hosts that have an intersection API feed proximity events directly; hosts
//! that only know rectangles can classify a region here.

use crate::constants::PROXIMITY_MARGIN_PX;

/// Axis-aligned rectangle in viewport CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.left - margin,
            self.top - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Overlap test; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Proximity {
    Outside,
    /// Within the margin but not yet on screen.
    Near,
    Visible,
}

pub fn classify(region: &Rect, viewport: &Rect) -> Proximity {
    if region.intersects(viewport) {
        Proximity::Visible
    } else if region.intersects(&viewport.expanded(PROXIMITY_MARGIN_PX)) {
        Proximity::Near
    } else {
        Proximity::Outside
    }
}
