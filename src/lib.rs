//! Sky Blaster - a canvas arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (spawning, movement, collisions, scoring, power-ups)
//! - `tuning`: Per-variant game balance (desktop, mobile, responsive)
//! - `platform`: Input mapping and frame timing for browser/native drivers

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{InputSource, Tuning, TuningError, Variant};

/// Game configuration constants
pub mod consts {
    /// Assumed frame duration (60 Hz). Boost time decays by this much per tick.
    pub const TICK_MS: f32 = 16.0;

    /// Player defaults (unscaled)
    pub const PLAYER_SIZE: f32 = 100.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Pixels per tick on each axis
    pub const PLAYER_MOVE_SPEED: f32 = 10.0;

    /// Enemy defaults (unscaled)
    pub const ENEMY_DAMAGE: i32 = 20;
    /// Per-tick fall speed is drawn from [MIN, MAX)
    pub const ENEMY_MIN_SPEED: f32 = 3.0;
    pub const ENEMY_MAX_SPEED: f32 = 5.0;
    /// Number of enemy art variants the renderer can pick from
    pub const ENEMY_SPRITE_COUNT: u8 = 5;

    /// Projectile defaults
    pub const SHOT_SIZE: f32 = 15.0;
    pub const SHOT_SPEED: f32 = 12.0;
    pub const BOOSTED_SHOT_SPEED: f32 = 15.0;
    /// Horizontal drift of the two side shots in triple-fire mode
    pub const SIDE_SHOT_DRIFT: f32 = 3.0;
    pub const FIRE_INTERVAL_MS: f64 = 300.0;

    /// Scoring
    pub const SCORE_PER_KILL: u32 = 10;

    /// Power-ups
    pub const HEAL_AMOUNT: i32 = 20;
    pub const BOOST_DURATION_MS: f32 = 20_000.0;
    pub const HEALER_SPAWN_INTERVAL_MS: f64 = 10_000.0;
    pub const BOOSTER_SPAWN_INTERVAL_MS: f64 = 15_000.0;

    /// Viewports narrower than this get the compact responsive layout
    pub const COMPACT_BREAKPOINT: f32 = 600.0;
    pub const COMPACT_CANVAS_WIDTH: f32 = 400.0;
    pub const COMPACT_CANVAS_HEIGHT: f32 = 300.0;

    /// Below this width an unconfigured page gets the touch layout
    pub const TOUCH_BREAKPOINT: f32 = 768.0;
}
