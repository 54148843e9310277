//! Time-gated spawning of enemies and power-up markers

use rand::Rng;

use super::geometry::Rect;
use super::state::{Enemy, GameEvent, GameState, MarkerKind, SpriteTag};
use crate::consts::ENEMY_SPRITE_COUNT;
use crate::tuning::Tuning;

/// Gate: true when more than `interval` ms passed since `last`
#[inline]
pub fn should_spawn(now: f64, last: f64, interval: f64) -> bool {
    now - last > interval
}

/// Uniform sample from `[0, span)`, or 0 when there is no room
fn sample_span<R: Rng>(rng: &mut R, span: f32) -> f32 {
    if span > 0.0 {
        rng.random_range(0.0..span)
    } else {
        0.0
    }
}

/// A new enemy just above the top edge, at a random column
pub fn spawn_enemy<R: Rng>(tuning: &Tuning, rng: &mut R) -> Enemy {
    let size = tuning.enemy_extent();
    let x = sample_span(rng, tuning.canvas_width - size);
    let speed = rng.random_range(tuning.enemy_min_speed..tuning.enemy_max_speed);
    let sprite = SpriteTag(rng.random_range(0..ENEMY_SPRITE_COUNT));
    Enemy {
        rect: Rect::square(x, -size, size),
        speed,
        sprite,
    }
}

/// A new marker placed fully on-screen
pub fn spawn_marker<R: Rng>(tuning: &Tuning, rng: &mut R) -> Rect {
    let size = tuning.marker_extent();
    let x = sample_span(rng, tuning.canvas_width - size);
    let y = sample_span(rng, tuning.canvas_height - size);
    Rect::square(x, y, size)
}

/// Evaluate the enemy, healer and booster gates, in that order
pub fn run_spawners(state: &mut GameState, now: f64) {
    if should_spawn(now, state.last_spawn.enemy, state.tuning.enemy_spawn_interval_ms) {
        let enemy = spawn_enemy(&state.tuning, &mut state.rng);
        log::debug!("Enemy spawned at x={:.0} speed={:.2}", enemy.rect.x, enemy.speed);
        state.enemies.push(enemy);
        state.last_spawn.enemy = now;
        state.events.push(GameEvent::EnemySpawned);
    }

    try_spawn_marker(state, MarkerKind::Healer, now);
    try_spawn_marker(state, MarkerKind::Booster, now);
}

/// Spawn a marker of `kind` if none is live and its interval has elapsed.
///
/// Returns true when a marker was created.
pub fn try_spawn_marker(state: &mut GameState, kind: MarkerKind, now: f64) -> bool {
    if state.marker(kind).is_some() {
        return false;
    }

    let (last, interval) = match kind {
        MarkerKind::Healer => (state.last_spawn.healer, state.tuning.healer_spawn_interval_ms),
        MarkerKind::Booster => (
            state.last_spawn.booster,
            state.tuning.booster_spawn_interval_ms,
        ),
    };
    if !should_spawn(now, last, interval) {
        return false;
    }

    let rect = spawn_marker(&state.tuning, &mut state.rng);
    log::debug!("{} marker spawned at ({:.0}, {:.0})", kind.as_str(), rect.x, rect.y);
    *state.marker_slot(kind) = Some(rect);
    match kind {
        MarkerKind::Healer => state.last_spawn.healer = now,
        MarkerKind::Booster => state.last_spawn.booster = now,
    }
    state.events.push(GameEvent::MarkerSpawned(kind));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Variant;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn desktop() -> Tuning {
        Tuning::for_variant(Variant::Desktop, 800.0, 600.0)
    }

    #[test]
    fn test_should_spawn_is_strict() {
        assert!(!should_spawn(1000.0, 0.0, 1000.0));
        assert!(should_spawn(1000.1, 0.0, 1000.0));
        assert!(!should_spawn(500.0, 0.0, 1000.0));
    }

    #[test]
    fn test_enemy_spawn_bounds() {
        let tuning = desktop();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let enemy = spawn_enemy(&tuning, &mut rng);
            assert_eq!(enemy.rect.y, -120.0);
            assert_eq!(enemy.rect.width, 120.0);
            assert!(enemy.rect.x >= 0.0 && enemy.rect.x <= 680.0);
            assert!(enemy.speed >= 3.0 && enemy.speed < 5.0);
            assert!(enemy.sprite.0 < ENEMY_SPRITE_COUNT);
        }
    }

    #[test]
    fn test_marker_spawn_is_on_screen() {
        let tuning = Tuning::for_variant(Variant::Mobile, 400.0, 700.0);
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            let marker = spawn_marker(&tuning, &mut rng);
            assert_eq!(marker.width, 40.0);
            assert!(marker.x >= 0.0 && marker.right() <= 400.0);
            assert!(marker.y >= 0.0 && marker.bottom() <= 700.0);
        }
    }

    #[test]
    fn test_enemy_fills_canvas_width() {
        let mut tuning = desktop();
        tuning.canvas_width = 100.0;
        let mut rng = Pcg32::seed_from_u64(5);
        let enemy = spawn_enemy(&tuning, &mut rng);
        assert_eq!(enemy.rect.x, 0.0);
    }

    #[test]
    fn test_spawner_order_and_timestamps() {
        let mut state = GameState::new(desktop(), 9);
        // Desktop enemy interval is 500 ms, strictly exceeded
        run_spawners(&mut state, 500.0);
        assert!(state.enemies.is_empty());

        run_spawners(&mut state, 1001.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.last_spawn.enemy, 1001.0);
        assert!(state.healer.is_none());

        run_spawners(&mut state, 15_001.0);
        assert_eq!(state.enemies.len(), 2);
        assert!(state.healer.is_some());
        assert!(state.booster.is_some());
        assert_eq!(
            state.events[state.events.len() - 3..],
            [
                GameEvent::EnemySpawned,
                GameEvent::MarkerSpawned(MarkerKind::Healer),
                GameEvent::MarkerSpawned(MarkerKind::Booster),
            ]
        );
    }

    #[test]
    fn test_marker_exclusivity() {
        let mut state = GameState::new(desktop(), 9);
        assert!(try_spawn_marker(&mut state, MarkerKind::Healer, 10_001.0));
        let first = state.healer;

        // Gate is open again, but a healer is still live
        assert!(!try_spawn_marker(&mut state, MarkerKind::Healer, 50_000.0));
        assert_eq!(state.healer, first);
        assert_eq!(state.last_spawn.healer, 10_001.0);
    }
}
