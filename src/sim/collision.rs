//! Collision detection and resolution
//!
//! Circle overlap tests between asteroids and the sun or planets. Asteroids
//! always survive; the sun takes damage and planets are destroyed.

use glam::Vec2;

use super::state::{Asteroid, Explosion, Planet, Sun};
use crate::consts::*;

/// What a collision pass produced
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionOutcome {
    pub sun_health: f32,
    /// Planets still in orbit, in their previous order
    pub planets: Vec<Planet>,
    /// New explosions, in the order the hits were found
    pub explosions: Vec<Explosion>,
    /// Ids of planets destroyed this pass
    pub lost_planets: Vec<u64>,
    /// Whether any asteroid struck the sun
    pub sun_struck: bool,
}

/// Overlap test between two circles given by center and diameter
///
/// Two bodies touch once their centers are closer than half their summed sizes.
#[inline]
pub fn overlaps(a: Vec2, a_size: f32, b: Vec2, b_size: f32) -> bool {
    a.distance(b) < (a_size + b_size) / 2.0
}

/// Resolve every asteroid against the sun and every remaining planet
///
/// Each asteroid is checked independently: a sun strike zeroes health but does
/// not stop the planet checks for that asteroid or later ones. A planet is
/// removed by id the first time any asteroid reaches it and is not tested
/// again in this pass.
pub fn resolve(sun: &Sun, planets: &[Planet], asteroids: &[Asteroid]) -> CollisionOutcome {
    let mut sun_health = sun.health;
    let mut remaining = planets.to_vec();
    let mut explosions = Vec::new();
    let mut lost_planets = Vec::new();
    let mut sun_struck = false;

    for asteroid in asteroids {
        if overlaps(sun.pos, sun.size, asteroid.pos, asteroid.size) {
            sun_health = 0.0;
            sun_struck = true;
            explosions.push(Explosion::new(asteroid.pos, SUN_HIT_EXPLOSION_SIZE));
        }

        remaining.retain(|planet| {
            let pos = planet.position(sun.pos);
            if !overlaps(pos, planet.size, asteroid.pos, asteroid.size) {
                return true;
            }
            sun_health = (sun_health - PLANET_LOSS_DAMAGE).max(0.0);
            explosions.push(Explosion::new(pos, PLANET_HIT_EXPLOSION_SIZE));
            lost_planets.push(planet.id);
            false
        });
    }

    CollisionOutcome {
        sun_health,
        planets: remaining,
        explosions,
        lost_planets,
        sun_struck,
    }
}
