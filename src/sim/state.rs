//! Game state and core simulation types
//!
//! A tick never edits a `GameState` in place: it reads the previous state and
//! builds the next one, so every frame is a self-contained snapshot.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use crate::consts::*;
use crate::{Color, polar_to_cartesian};

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the title screen for the first key press
    Title,
    /// Active gameplay
    Playing,
    /// Sun health ran out. Only a full re-initialization leaves this phase.
    GameOver,
}

/// Play area supplied by the host, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True while `pos` is strictly inside the viewport grown by `margin` on all sides
    pub fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x > -margin
            && pos.x < self.width + margin
            && pos.y > -margin
            && pos.y < self.height + margin
    }

    /// Pull a circle of diameter `size` back fully on screen
    pub fn clamp_inside(&self, pos: Vec2, size: f32) -> Vec2 {
        let half = size / 2.0;
        Vec2::new(
            pos.x.clamp(half, (self.width - half).max(half)),
            pos.y.clamp(half, (self.height - half).max(half)),
        )
    }
}

/// The player's star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sun {
    pub pos: Vec2,
    /// 0..=100, zero ends the game
    pub health: f32,
    /// Diameter (px)
    pub size: f32,
}

impl Sun {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: SUN_MAX_HEALTH,
            size: SUN_SIZE,
        }
    }
}

/// A planet on a circular, purely kinematic orbit around the sun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: u64,
    /// Orbit radius (px)
    pub distance: f32,
    /// Orbit angle (radians, kept in [0, 2π))
    pub angle: f32,
    /// Radians per TIME_SCALE milliseconds
    pub speed: f32,
    pub color: Color,
    /// Diameter (px)
    pub size: f32,
}

impl Planet {
    /// Where the planet is, given where the sun is now
    #[inline]
    pub fn position(&self, sun_pos: Vec2) -> Vec2 {
        sun_pos + polar_to_cartesian(self.distance, self.angle)
    }

    /// This planet after `dt` milliseconds of orbiting
    pub fn advanced(&self, dt: f32) -> Self {
        Self {
            angle: (self.angle + self.speed * dt / TIME_SCALE).rem_euclid(TAU),
            ..self.clone()
        }
    }
}

/// An incoming rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Pixels per TIME_SCALE milliseconds
    pub vel: Vec2,
    /// Diameter (px)
    pub size: f32,
    /// Past positions, oldest first, at most TRAIL_LENGTH
    pub trail: VecDeque<Vec2>,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// This asteroid after `dt` milliseconds of flight; the pre-move position joins the trail
    pub fn advanced(&self, dt: f32) -> Self {
        let mut trail = self.trail.clone();
        trail.push_back(self.pos);
        while trail.len() > TRAIL_LENGTH {
            trail.pop_front();
        }
        Self {
            pos: self.pos + self.vel * dt / TIME_SCALE,
            vel: self.vel,
            size: self.size,
            trail,
        }
    }

    /// Trail points paired with their opacity; older points are fainter
    pub fn trail_fade(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        let len = self.trail.len() as f32;
        self.trail
            .iter()
            .enumerate()
            .map(move |(i, &pos)| (pos, i as f32 / len * TRAIL_MAX_ALPHA))
    }
}

/// A short-lived blast left by a collision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub size: f32,
    /// 0..1, removed on reaching 1
    pub age: f32,
}

impl Explosion {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size, age: 0.0 }
    }

    /// Age by `dt` milliseconds, `None` once burnt out
    pub fn aged(&self, dt: f32) -> Option<Self> {
        let age = self.age + dt / TIME_SCALE;
        (age < 1.0).then_some(Self { age, ..*self })
    }
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub sun: Sun,
    /// Insertion order is preserved
    pub planets: Vec<Planet>,
    pub asteroids: Vec<Asteroid>,
    pub explosions: Vec<Explosion>,
    pub score: f64,
    /// 1..=10, only ever grows
    pub difficulty: f32,
    pub muted: bool,
    /// Timestamp of the previous tick (ms), `None` until the first tick primes it
    pub last_update_time: Option<f64>,
    /// Timestamp of the previous asteroid spawn (ms)
    pub last_asteroid_spawn: f64,
    rng: Pcg32,
    next_planet_id: u64,
}

impl GameState {
    /// Fresh title-screen state with the sun centered and the starting planets in orbit
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let planets = spawn::initial_planets();
        let next_planet_id = planets.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            seed,
            viewport,
            phase: GamePhase::Title,
            sun: Sun::new(viewport.center()),
            planets,
            asteroids: Vec::new(),
            explosions: Vec::new(),
            score: 0.0,
            difficulty: MIN_DIFFICULTY,
            muted: false,
            last_update_time: None,
            last_asteroid_spawn: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_planet_id,
        }
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Title
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Started and not yet lost
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Leave the title screen. Any other phase is returned untouched.
    pub fn started(&self) -> Self {
        let mut next = self.clone();
        if next.phase == GamePhase::Title {
            next.phase = GamePhase::Playing;
        }
        next
    }

    pub fn with_muted(&self, muted: bool) -> Self {
        Self {
            muted,
            ..self.clone()
        }
    }

    /// Adopt a new host viewport, keeping the sun on screen
    pub fn with_viewport(&self, viewport: Viewport) -> Self {
        let mut next = self.clone();
        next.viewport = viewport;
        next.sun.pos = viewport.clamp_inside(next.sun.pos, next.sun.size);
        next
    }

    /// Allocate the next unique planet id
    pub fn next_planet_id(&mut self) -> u64 {
        let id = self.next_planet_id;
        self.next_planet_id += 1;
        id
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}
