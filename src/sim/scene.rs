//! Renderer-facing snapshot of a game state

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{Enemy, GamePhase, GameState, Player, Projectile};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub healer: Option<Rect>,
    pub booster: Option<Rect>,
    pub score: u32,
    pub boost_active: bool,
    pub boost_remaining_ms: f32,
    pub game_over: bool,
}

impl Scene {
    /// Health as a 0-1 fraction, for health bars
    pub fn health_fraction(&self) -> f32 {
        (self.player.health as f32 / crate::consts::PLAYER_MAX_HEALTH as f32).clamp(0.0, 1.0)
    }

    /// JSON form, for JS-side renderers
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl GameState {
    /// Snapshot the post-tick state for rendering
    pub fn scene(&self) -> Scene {
        Scene {
            canvas_width: self.tuning.canvas_width,
            canvas_height: self.tuning.canvas_height,
            player: self.player,
            enemies: self.enemies.clone(),
            projectiles: self.projectiles.clone(),
            healer: self.healer,
            booster: self.booster,
            score: self.score,
            boost_active: self.boost_active,
            boost_remaining_ms: self.boost_remaining_ms,
            game_over: self.phase == GamePhase::GameOver,
        }
    }
}
