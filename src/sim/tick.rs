//! Per-frame simulation tick
//!
//! `advance` is a pure transition: it reads one `GameState` and returns the
//! next. Time is measured in host milliseconds and every rate is expressed per
//! TIME_SCALE milliseconds.

use glam::Vec2;

use super::collision;
use super::spawn;
use super::state::{GamePhase, GameState, Viewport};
use crate::consts::*;

/// Movement intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    pub fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Advance the game to timestamp `now` (ms)
///
/// Returns an unchanged copy while on the title screen or after game over.
pub fn advance(state: &GameState, input: &TickInput, now: f64) -> GameState {
    if !state.is_active() {
        return state.clone();
    }

    let mut next = state.clone();

    // First tick after start only primes the clock
    let dt = state
        .last_update_time
        .map_or(0.0, |last| (now - last).max(0.0) as f32);
    next.last_update_time = Some(now);

    next.sun.pos = move_sun(state.sun.pos, state.sun.size, input, dt, &state.viewport);
    next.difficulty = (state.difficulty + dt / DIFFICULTY_RAMP_MS).min(MAX_DIFFICULTY);

    next.planets = state.planets.iter().map(|p| p.advanced(dt)).collect();

    let viewport = state.viewport;
    next.asteroids = state
        .asteroids
        .iter()
        .map(|a| a.advanced(dt))
        .filter(|a| viewport.contains_with_margin(a.pos, EDGE_MARGIN))
        .collect();

    if spawn::asteroid_due(now, state.last_asteroid_spawn, next.difficulty) {
        let difficulty = next.difficulty;
        let asteroid = spawn::asteroid(next.rng_mut(), &viewport, difficulty);
        log::debug!(
            "Asteroid spawned at ({:.0}, {:.0}) size {:.1}",
            asteroid.pos.x,
            asteroid.pos.y,
            asteroid.size
        );
        next.asteroids.push(asteroid);
        next.last_asteroid_spawn = now;
    }

    if spawn::planet_due(next.rng_mut(), dt) {
        let id = next.next_planet_id();
        let planet = spawn::planet(next.rng_mut(), id);
        log::debug!("Planet {} joined orbit at distance {:.0}", id, planet.distance);
        next.planets.push(planet);
    }

    let outcome = collision::resolve(&next.sun, &next.planets, &next.asteroids);
    if outcome.sun_struck {
        log::debug!("Asteroid struck the sun");
    }
    for id in &outcome.lost_planets {
        log::debug!("Planet {} destroyed", id);
    }
    next.sun.health = outcome.sun_health;
    next.planets = outcome.planets;
    next.explosions.extend(outcome.explosions);

    next.explosions = next
        .explosions
        .iter()
        .filter_map(|e| e.aged(dt))
        .collect();

    next.score += f64::from(dt) / f64::from(TIME_SCALE);

    if next.sun.health <= 0.0 {
        next.phase = GamePhase::GameOver;
        log::info!("Game over - final score {}", next.score.floor());
    }

    next
}

/// Displace the sun along each held axis, keeping it fully on screen
fn move_sun(pos: Vec2, size: f32, input: &TickInput, dt: f32, viewport: &Viewport) -> Vec2 {
    let step = SUN_SPEED * dt;
    let half = size / 2.0;
    let mut pos = pos;
    if input.up {
        pos.y = (pos.y - step).max(half);
    }
    if input.down {
        pos.y = (pos.y + step).min(viewport.height - half);
    }
    if input.left {
        pos.x = (pos.x - step).max(half);
    }
    if input.right {
        pos.x = (pos.x + step).min(viewport.width - half);
    }
    pos
}
