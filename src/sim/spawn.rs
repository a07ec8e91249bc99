//! Procedural generation of asteroids and planets
//!
//! All draws are range-constrained here, so callers never see an
//! out-of-range size, speed or position.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, Planet, Viewport};
use crate::consts::*;
use crate::hsl_to_rgba;

/// Viewport edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Point `along` (0..1) this edge, pushed EDGE_MARGIN outside the viewport
    pub fn spawn_point(self, viewport: &Viewport, along: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(along * viewport.width, -EDGE_MARGIN),
            Edge::Right => Vec2::new(viewport.width + EDGE_MARGIN, along * viewport.height),
            Edge::Bottom => Vec2::new(along * viewport.width, viewport.height + EDGE_MARGIN),
            Edge::Left => Vec2::new(-EDGE_MARGIN, along * viewport.height),
        }
    }
}

/// The three planets every run starts with
pub fn initial_planets() -> Vec<Planet> {
    vec![
        Planet {
            id: 1,
            distance: 100.0,
            angle: 0.0,
            speed: 0.02,
            color: [0.204, 0.596, 0.859, 1.0],
            size: 15.0,
        },
        Planet {
            id: 2,
            distance: 180.0,
            angle: 2.0,
            speed: 0.015,
            color: [0.906, 0.298, 0.235, 1.0],
            size: 20.0,
        },
        Planet {
            id: 3,
            distance: 260.0,
            angle: 4.0,
            speed: 0.01,
            color: [0.180, 0.800, 0.443, 1.0],
            size: 25.0,
        },
    ]
}

/// Milliseconds between asteroid spawns at the given difficulty
#[inline]
pub fn asteroid_interval(difficulty: f32) -> f64 {
    ASTEROID_SPAWN_INTERVAL_MS / f64::from(difficulty)
}

/// Whether enough time has passed since the last spawn
pub fn asteroid_due(now: f64, last_spawn: f64, difficulty: f32) -> bool {
    now - last_spawn > asteroid_interval(difficulty)
}

/// A new asteroid at a random edge, faster at higher difficulty
pub fn asteroid<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport, difficulty: f32) -> Asteroid {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let pos = edge.spawn_point(viewport, rng.random::<f32>());
    let vel = Vec2::new(
        (rng.random::<f32>() - 0.5) * ASTEROID_VELOCITY_SPREAD * difficulty,
        (rng.random::<f32>() - 0.5) * ASTEROID_VELOCITY_SPREAD * difficulty,
    );
    let size = rng.random::<f32>() * ASTEROID_SIZE_RANGE + ASTEROID_MIN_SIZE;
    Asteroid::new(pos, vel, size)
}

/// Roll for a planet spawn over `dt` milliseconds
pub fn planet_due<R: Rng + ?Sized>(rng: &mut R, dt: f32) -> bool {
    rng.random::<f32>() < PLANET_SPAWN_CHANCE * dt / TIME_SCALE
}

/// A new planet with random orbit, hue and size
pub fn planet<R: Rng + ?Sized>(rng: &mut R, id: u64) -> Planet {
    Planet {
        id,
        distance: rng.random::<f32>() * PLANET_DISTANCE_RANGE + PLANET_MIN_DISTANCE,
        angle: rng.random::<f32>() * TAU,
        speed: rng.random::<f32>() * PLANET_SPEED_RANGE + PLANET_MIN_SPEED,
        color: hsl_to_rgba(rng.random::<f32>() * 360.0, 0.7, 0.5),
        size: rng.random::<f32>() * PLANET_SIZE_RANGE + PLANET_MIN_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_left_and_right_edges_sit_outside() {
        let vp = viewport();
        assert_eq!(Edge::Left.spawn_point(&vp, 0.5).x, -50.0);
        assert_eq!(Edge::Right.spawn_point(&vp, 0.5).x, 850.0);
        assert_eq!(Edge::Top.spawn_point(&vp, 0.25), Vec2::new(200.0, -50.0));
        assert_eq!(Edge::Bottom.spawn_point(&vp, 0.0), Vec2::new(0.0, 650.0));
    }

    #[test]
    fn test_spawn_interval_shrinks_with_difficulty() {
        assert_eq!(asteroid_interval(1.0), 2000.0);
        assert_eq!(asteroid_interval(10.0), 200.0);
        assert!(!asteroid_due(2000.0, 0.0, 1.0));
        assert!(asteroid_due(2000.5, 0.0, 1.0));
        assert!(asteroid_due(201.0, 0.0, 10.0));
    }

    #[test]
    fn test_asteroid_draws_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let vp = viewport();
        for _ in 0..500 {
            let a = asteroid(&mut rng, &vp, 3.0);
            assert!((10.0..30.0).contains(&a.size));
            assert!(a.vel.x.abs() <= 6.0 && a.vel.y.abs() <= 6.0);
            assert!(a.trail.is_empty());
            // Every spawn is on the margin ring just outside the viewport
            let on_vertical_edge = a.pos.x == -50.0 || a.pos.x == 850.0;
            let on_horizontal_edge = a.pos.y == -50.0 || a.pos.y == 650.0;
            assert!(on_vertical_edge || on_horizontal_edge, "{:?}", a.pos);
        }
    }

    #[test]
    fn test_planet_draws_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        for id in 10..200 {
            let p = planet(&mut rng, id);
            assert_eq!(p.id, id);
            assert!((150.0..350.0).contains(&p.distance));
            assert!((0.0..TAU).contains(&p.angle));
            assert!((0.005..0.025).contains(&p.speed));
            assert!((15.0..30.0).contains(&p.size));
        }
    }

    #[test]
    fn test_planet_roll_never_fires_without_elapsed_time() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert!((0..1000).all(|_| !planet_due(&mut rng, 0.0)));
    }

    #[test]
    fn test_initial_planets() {
        let planets = initial_planets();
        let ids: Vec<u64> = planets.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(planets[0].distance, 100.0);
        assert_eq!(planets[0].angle, 0.0);
    }
}
