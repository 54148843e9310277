//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - One seeded RNG per session
//! - Stable iteration order (spawn order)
//! - Input arrives as `TickInput`, output leaves as `Scene`

pub mod geometry;
pub mod input;
pub mod scene;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geometry::{Rect, intersects};
pub use input::{DirectionKeys, Movement, TickInput};
pub use scene::Scene;
pub use spawn::{should_spawn, spawn_enemy, spawn_marker, try_spawn_marker};
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, MarkerKind, Player, Projectile, SpawnClock, SpriteTag,
};
pub use tick::tick;
