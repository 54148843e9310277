//! Per-tick input intent
//!
//! The simulation never sees keys or touches, only this.

use glam::Vec2;

use super::geometry::Rect;

/// Four held directions (keyboard style)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Directional intent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    /// Independent axes at full speed each; diagonals are not normalized
    Keys(DirectionKeys),
    /// Analog vector; only its direction is used
    Analog(Vec2),
}

impl Default for Movement {
    fn default() -> Self {
        Movement::Keys(DirectionKeys::default())
    }
}

impl Movement {
    /// Move `rect` by `speed` per axis and keep it inside the field
    pub fn apply(&self, rect: &mut Rect, speed: f32, width: f32, height: f32) {
        match *self {
            Movement::Keys(keys) => {
                if keys.up {
                    rect.y = (rect.y - speed).max(0.0);
                }
                if keys.down {
                    rect.y = (rect.y + speed).min(height - rect.height);
                }
                if keys.left {
                    rect.x = (rect.x - speed).max(0.0);
                }
                if keys.right {
                    rect.x = (rect.x + speed).min(width - rect.width);
                }
            }
            Movement::Analog(dir) => {
                // Zero stick means no movement (and no clamp either)
                if let Some(dir) = dir.try_normalize() {
                    rect.x += dir.x * speed;
                    rect.y += dir.y * speed;
                    rect.clamp_within(width, height);
                }
            }
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub movement: Movement,
    /// Trigger held
    pub fire: bool,
}
