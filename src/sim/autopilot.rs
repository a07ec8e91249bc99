//! Attract-mode autopilot
//!
//! Plays the game on its own by dodging the asteroid that will pass closest
//! to the sun soonest. Used by the headless runner and the web demo toggle.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;

/// How far ahead threats are considered, in TIME_SCALE steps
const LOOKAHEAD_STEPS: f32 = 120.0;
/// Extra clearance kept around the sun (px)
const SAFETY_MARGIN: f32 = 40.0;
/// Ignore steering components smaller than this
const DEADZONE: f32 = 0.2;
/// Stop drifting home once this close to the center (px)
const HOME_RADIUS: f32 = 80.0;

/// Derive movement intent for the current state
pub fn steer(state: &GameState) -> TickInput {
    let sun = state.sun.pos;

    let threat = state
        .asteroids
        .iter()
        .filter_map(|asteroid| {
            let rel = asteroid.pos - sun;
            let speed_sq = asteroid.vel.length_squared();
            let t = if speed_sq > 0.0 {
                (-rel.dot(asteroid.vel) / speed_sq).max(0.0)
            } else {
                0.0
            };
            if t > LOOKAHEAD_STEPS {
                return None;
            }
            let closest = rel + asteroid.vel * t;
            let clearance = (state.sun.size + asteroid.size) / 2.0 + SAFETY_MARGIN;
            (closest.length() < clearance).then_some((t, closest, asteroid.vel))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0));

    let dir = match threat {
        // Dead-on approach: sidestep across its path
        Some((_, closest, vel)) if closest.length() < 1.0 => Vec2::new(-vel.y, vel.x),
        Some((_, closest, _)) => -closest,
        None => {
            let home = state.viewport.center() - sun;
            if home.length() < HOME_RADIUS {
                return TickInput::default();
            }
            home
        }
    };

    let dir = dir.normalize_or_zero();
    TickInput {
        up: dir.y < -DEADZONE,
        down: dir.y > DEADZONE,
        left: dir.x < -DEADZONE,
        right: dir.x > DEADZONE,
    }
}
