//! Axis-aligned bounding boxes
//!
//! Every entity collides as a rectangle; overlap is the only physics.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in canvas pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of the given size with its top-left corner at (x, y)
    pub const fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.y + self.height / 2.0)
    }

    /// Strict overlap test (see [`intersects`])
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }

    /// Pull the rectangle back inside a `width` x `height` field
    pub fn clamp_within(&mut self, width: f32, height: f32) {
        self.x = self.x.max(0.0).min(width - self.width);
        self.y = self.y.max(0.0).min(height - self.height);
    }

    /// True once the top edge has passed below the field
    pub fn is_below(&self, height: f32) -> bool {
        self.y > height
    }
}

/// Check whether two rectangles overlap on both axes.
///
/// Shared edges do not count: boxes that merely touch are not colliding.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
