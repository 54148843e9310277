//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one animation frame.
//! Step order defines the tie-break policy: spawns, player move, fire,
//! enemies (hit the player first), projectiles, pickups, boost decay.

use super::geometry::{Rect, intersects};
use super::input::TickInput;
use super::spawn::run_spawners;
use super::state::{GameEvent, GamePhase, GameState, MarkerKind, Projectile};
use crate::consts::*;

/// Advance the game state by one frame.
///
/// `now_ms` is the frame timestamp (e.g. the `requestAnimationFrame` time).
/// Interval gates compare timestamps, so dropped frames still honour them;
/// motion and boost decay are per tick.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        state.events.clear();
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over: score {} after {} ticks", state.score, state.time_ticks);
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    run_spawners(state, now_ms);

    let tuning = &state.tuning;
    input.movement.apply(
        &mut state.player.rect,
        tuning.move_speed,
        tuning.canvas_width,
        tuning.canvas_height,
    );

    if input.fire && now_ms - state.last_fire_ms > state.tuning.fire_interval_ms {
        fire(state);
        state.last_fire_ms = now_ms;
    }

    advance_enemies(state);
    advance_projectiles(state);
    collect_markers(state);
    decay_boost(state);
}

/// Spawn one straight shot, or the triple spread while boosted
fn fire(state: &mut GameState) {
    let size = state.tuning.shot_extent();
    let origin = Rect::square(state.player.rect.center_x() - size / 2.0, state.player.rect.y, size);

    let shots: &[(f32, f32)] = if state.boost_active {
        &[
            (BOOSTED_SHOT_SPEED, 0.0),
            (BOOSTED_SHOT_SPEED, -SIDE_SHOT_DRIFT),
            (BOOSTED_SHOT_SPEED, SIDE_SHOT_DRIFT),
        ]
    } else {
        &[(SHOT_SPEED, 0.0)]
    };

    state
        .projectiles
        .extend(shots.iter().map(|&(speed, drift)| Projectile {
            rect: origin,
            speed,
            drift,
        }));
    state.events.push(GameEvent::ShotFired {
        count: shots.len() as u8,
    });
}

/// Drop enemies, resolve contact with the player, despawn the fallen
fn advance_enemies(state: &mut GameState) {
    let player_rect = state.player.rect;
    let canvas_height = state.tuning.canvas_height;
    let despawn = state.tuning.despawn_offscreen_enemies;
    let mut hits = 0;

    state.enemies.retain_mut(|enemy| {
        enemy.rect.y += enemy.speed;
        if intersects(&player_rect, &enemy.rect) {
            hits += 1;
            return false;
        }
        !(despawn && enemy.rect.is_below(canvas_height))
    });

    // Each colliding enemy damages exactly once, then is gone
    for _ in 0..hits {
        state.player.damage(ENEMY_DAMAGE);
        state.events.push(GameEvent::PlayerHit {
            health: state.player.health,
        });
    }
}

/// Move shots, drop the ones that left the field, resolve hits.
///
/// A shot removes at most one enemy: the first overlapping one in spawn order.
fn advance_projectiles(state: &mut GameState) {
    let (width, height) = (state.tuning.canvas_width, state.tuning.canvas_height);
    let mut projectiles = std::mem::take(&mut state.projectiles);

    projectiles.retain_mut(|shot| {
        shot.rect.x += shot.drift;
        shot.rect.y -= shot.speed;
        let r = &shot.rect;
        if r.y < 0.0 || r.y > height || r.x < 0.0 || r.x > width {
            return false;
        }

        match state.enemies.iter().position(|e| intersects(r, &e.rect)) {
            Some(index) => {
                state.enemies.remove(index);
                state.score += SCORE_PER_KILL;
                state.events.push(GameEvent::EnemyDestroyed { score: state.score });
                false
            }
            None => true,
        }
    });

    state.projectiles = projectiles;
}

/// Player touching a marker consumes it
fn collect_markers(state: &mut GameState) {
    let player_rect = state.player.rect;
    for kind in [MarkerKind::Healer, MarkerKind::Booster] {
        let touched = state
            .marker(kind)
            .is_some_and(|marker| intersects(&player_rect, marker));
        if !touched {
            continue;
        }

        *state.marker_slot(kind) = None;
        match kind {
            MarkerKind::Healer => state.player.heal(HEAL_AMOUNT),
            MarkerKind::Booster => state.activate_boost(),
        }
        log::debug!("Collected {} marker", kind.as_str());
        state.events.push(GameEvent::MarkerCollected(kind));
    }
}

/// Count the boost down by one frame
fn decay_boost(state: &mut GameState) {
    if !state.boost_active {
        return;
    }
    state.boost_remaining_ms -= TICK_MS;
    if state.boost_remaining_ms <= 0.0 {
        state.boost_active = false;
        state.boost_remaining_ms = 0.0;
        state.events.push(GameEvent::BoostExpired);
    }
}
