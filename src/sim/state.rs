//! Game state and core simulation types
//!
//! Everything one session mutates lives in [`GameState`]; the driver owns it
//! between ticks.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Health ran out; state is frozen until restart
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Always within `0..=PLAYER_MAX_HEALTH`
    pub health: i32,
}

impl Player {
    /// Full-health player centred in the field
    pub fn centered(tuning: &Tuning) -> Self {
        let size = tuning.player_extent();
        Self {
            rect: Rect::square(
                tuning.canvas_width / 2.0 - size / 2.0,
                tuning.canvas_height / 2.0 - size / 2.0,
                size,
            ),
            health: PLAYER_MAX_HEALTH,
        }
    }

    /// Apply damage, flooring at zero
    pub fn damage(&mut self, amount: i32) {
        self.health = (self.health - amount).clamp(0, PLAYER_MAX_HEALTH);
    }

    /// Restore health, capped at the maximum
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).clamp(0, PLAYER_MAX_HEALTH);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Opaque art tag for an enemy; the renderer maps it to an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteTag(pub u8);

/// A falling enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    /// Pixels per tick, downward
    pub speed: f32,
    pub sprite: SpriteTag,
}

/// A player shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    /// Pixels per tick, upward
    pub speed: f32,
    /// Pixels per tick, horizontal (0 for straight shots)
    pub drift: f32,
}

/// Power-up marker types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    /// Restores health
    Healer,
    /// Grants triple-shot for a while
    Booster,
}

impl MarkerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKind::Healer => "healer",
            MarkerKind::Booster => "booster",
        }
    }
}

/// Things that happened during a tick, for sound/UI cues and lifecycle hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned,
    MarkerSpawned(MarkerKind),
    /// Number of projectiles created by one trigger pull
    ShotFired { count: u8 },
    PlayerHit { health: i32 },
    EnemyDestroyed { score: u32 },
    MarkerCollected(MarkerKind),
    BoostExpired,
    GameOver { score: u32 },
}

/// Last time (ms) each spawner fired
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnClock {
    pub enemy: f64,
    pub healer: f64,
    pub booster: f64,
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    /// Balance/layout in effect
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles, in fire order
    pub projectiles: Vec<Projectile>,
    pub healer: Option<Rect>,
    pub booster: Option<Rect>,
    pub score: u32,
    pub boost_active: bool,
    pub boost_remaining_ms: f32,
    pub last_spawn: SpawnClock,
    /// Timestamp of the last trigger pull that produced shots
    pub last_fire_ms: f64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given tuning and seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            player: Player::centered(&tuning),
            tuning,
            phase: GamePhase::Playing,
            time_ticks: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            healer: None,
            booster: None,
            score: 0,
            boost_active: false,
            boost_remaining_ms: 0.0,
            last_spawn: SpawnClock::default(),
            last_fire_ms: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Throw the session away and start over with the same tuning
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting (seed {}, previous score {})", seed, self.score);
        *self = Self::new(self.tuning.clone(), seed);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn marker(&self, kind: MarkerKind) -> Option<&Rect> {
        match kind {
            MarkerKind::Healer => self.healer.as_ref(),
            MarkerKind::Booster => self.booster.as_ref(),
        }
    }

    pub(crate) fn marker_slot(&mut self, kind: MarkerKind) -> &mut Option<Rect> {
        match kind {
            MarkerKind::Healer => &mut self.healer,
            MarkerKind::Booster => &mut self.booster,
        }
    }

    /// Start (or refresh) the triple-shot boost
    pub fn activate_boost(&mut self) {
        self.boost_active = true;
        self.boost_remaining_ms = BOOST_DURATION_MS;
    }
}
