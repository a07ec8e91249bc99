//! Read-only per-tick view of the simulation
//!
//! This is everything presentation is allowed to see. Planet positions are
//! resolved here so renderers never recompute orbits.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::sim::GameState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunView {
    pub pos: Vec2,
    pub size: f32,
    pub health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetView {
    pub id: u64,
    pub pos: Vec2,
    /// Orbit radius, for drawing the orbit ring
    pub distance: f32,
    pub size: f32,
    pub color: Color,
}

/// One past asteroid position with its opacity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailDot {
    pub pos: Vec2,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub size: f32,
    /// Oldest (faintest) first
    pub trail: Vec<TrailDot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub pos: Vec2,
    pub size: f32,
    pub age: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub sun: SunView,
    pub planets: Vec<PlanetView>,
    pub asteroids: Vec<AsteroidView>,
    pub explosions: Vec<ExplosionView>,
    pub score: f64,
    pub difficulty: f32,
    pub game_started: bool,
    pub game_over: bool,
    pub is_muted: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let sun_pos = state.sun.pos;
        Self {
            width: state.viewport.width,
            height: state.viewport.height,
            sun: SunView {
                pos: sun_pos,
                size: state.sun.size,
                health: state.sun.health,
            },
            planets: state
                .planets
                .iter()
                .map(|p| PlanetView {
                    id: p.id,
                    pos: p.position(sun_pos),
                    distance: p.distance,
                    size: p.size,
                    color: p.color,
                })
                .collect(),
            asteroids: state
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    pos: a.pos,
                    size: a.size,
                    trail: a
                        .trail_fade()
                        .map(|(pos, alpha)| TrailDot { pos, alpha })
                        .collect(),
                })
                .collect(),
            explosions: state
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    pos: e.pos,
                    size: e.size,
                    age: e.age,
                })
                .collect(),
            score: state.score,
            difficulty: state.difficulty,
            game_started: state.is_started(),
            game_over: state.is_over(),
            is_muted: state.muted,
        }
    }

    /// Status line shown while playing
    pub fn hud_line(&self) -> String {
        format!(
            "Score: {} - Sun Health: {}%",
            self.final_score(),
            self.sun.health.floor()
        )
    }

    /// Whole points, as shown to the player
    pub fn final_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self::capture(state)
    }
}
