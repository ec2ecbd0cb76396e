//! Display-space geometry primitives.
//!
//! All coordinates are in points with the origin at the bottom-left corner of
//! the global display space and y growing upward.  A display whose usable area
//! starts at `(1920, 0)` is to the right of one starting at `(0, 0)`.

use serde::{Deserialize, Serialize};

/// A position in display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair, e.g. the natural size of rendered label text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle: bottom-left origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the left edge.
    pub x: f64,
    /// Y coordinate of the bottom edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the left edge.
    pub fn min_x(&self) -> f64 {
        self.x
    }

    /// Returns the bottom edge.
    pub fn min_y(&self) -> f64 {
        self.y
    }

    /// Returns the right edge (exclusive).
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the top edge (exclusive).
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns a copy of this rectangle moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
