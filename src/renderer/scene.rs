//! Scene assembly
//!
//! Turns a `Snapshot` (plus the decorative starfield) into one triangle list
//! in pixel coordinates, back to front.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::QualityPreset;
use crate::sim::Starfield;
use crate::snapshot::{AsteroidView, ExplosionView, PlanetView, Snapshot, SunView};

/// Orbit outline: 1px wide, 5px dashes, half opacity
const ORBIT_WIDTH: f32 = 1.0;
const ORBIT_DASH: f32 = 5.0;
const ORBIT_ALPHA: f32 = 0.5;

/// Build the frame. `time` is in seconds and only drives star flicker.
pub fn build_scene(
    snapshot: &Snapshot,
    starfield: Option<&Starfield>,
    time: f64,
    quality: QualityPreset,
) -> Vec<Vertex> {
    let segments = quality.circle_segments();
    let mut vertices = Vec::new();

    if let Some(stars) = starfield {
        push_stars(&mut vertices, stars, time);
    }

    // Entities only appear once the game has started
    if !snapshot.game_started {
        return vertices;
    }

    for planet in &snapshot.planets {
        push_orbit(&mut vertices, snapshot.sun.pos, planet);
    }
    push_sun(&mut vertices, &snapshot.sun, segments);
    for planet in &snapshot.planets {
        push_planet(&mut vertices, planet, segments);
    }
    for asteroid in &snapshot.asteroids {
        push_asteroid(&mut vertices, asteroid, quality.trails_enabled(), segments);
    }
    for explosion in &snapshot.explosions {
        push_explosion(&mut vertices, explosion, segments);
    }

    vertices
}

fn push_stars(out: &mut Vec<Vertex>, stars: &Starfield, time: f64) {
    for star in &stars.drifting {
        out.extend(shapes::circle(star.pos, star.size / 2.0, colors::STAR, 6));
    }
    for star in &stars.flickering {
        let color = colors::with_alpha(colors::STAR, star.brightness(time));
        out.extend(shapes::circle(star.pos, star.size / 2.0, color, 6));
    }
}

fn push_orbit(out: &mut Vec<Vertex>, sun_pos: Vec2, planet: &PlanetView) {
    let color = colors::with_alpha(planet.color, ORBIT_ALPHA);
    out.extend(shapes::dashed_ring(sun_pos, planet.distance, ORBIT_WIDTH, ORBIT_DASH, color));
}

/// Sun brightness follows its health
fn push_sun(out: &mut Vec<Vertex>, sun: &SunView, segments: u32) {
    let brightness = (sun.health / 100.0).clamp(0.0, 1.0);
    let radius = sun.size / 2.0;
    let halo = |color, alpha| colors::dimmed(colors::with_alpha(color, alpha), brightness);

    out.extend(shapes::circle(sun.pos, radius + 30.0, halo(colors::SUN_RIM, 0.15), segments));
    out.extend(shapes::circle(sun.pos, radius + 10.0, halo(colors::SUN_MID, 0.35), segments));

    let stops = [
        (1.0, colors::dimmed(colors::SUN_RIM, brightness)),
        (0.7, colors::dimmed(colors::SUN_MID, brightness)),
        (0.3, colors::dimmed(colors::SUN_CORE, brightness)),
    ];
    out.extend(shapes::radial_disc(sun.pos, radius, &stops, segments));
}

fn push_planet(out: &mut Vec<Vertex>, planet: &PlanetView, segments: u32) {
    let radius = planet.size / 2.0;
    let glow = colors::with_alpha(planet.color, 0.3);
    out.extend(shapes::circle(planet.pos, radius + 5.0, glow, segments));
    out.extend(shapes::circle(planet.pos, radius, planet.color, segments));
}

fn push_asteroid(out: &mut Vec<Vertex>, asteroid: &AsteroidView, trails: bool, segments: u32) {
    if trails {
        out.extend(shapes::trail_dots(
            asteroid.trail.iter().map(|dot| (dot.pos, dot.alpha)),
            asteroid.size,
            colors::TRAIL,
            segments / 2,
        ));
    }
    let stops = [
        (1.0, colors::ASTEROID_RIM),
        (0.7, colors::ASTEROID_MID),
        (0.35, colors::ASTEROID_CORE),
    ];
    out.extend(shapes::radial_disc(asteroid.pos, asteroid.size / 2.0, &stops, segments));
}

/// Explosions grow to twice their size while fading out
fn push_explosion(out: &mut Vec<Vertex>, explosion: &ExplosionView, segments: u32) {
    let age = explosion.age.clamp(0.0, 1.0);
    let fade = (1.0 - age) * (1.0 - age);
    let radius = explosion.size * (1.0 + age) / 2.0;
    let stops = [
        (1.0, colors::with_alpha(colors::EXPLOSION_RIM, fade)),
        (0.5, colors::with_alpha(colors::EXPLOSION_MID, fade)),
        (0.2, colors::with_alpha(colors::EXPLOSION_CORE, fade)),
    ];
    out.extend(shapes::radial_disc(explosion.pos, radius, &stops, segments));
}
