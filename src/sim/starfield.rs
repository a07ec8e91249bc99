//! Decorative background stars
//!
//! Updated on its own path, independent of the simulation tick; nothing here
//! affects gameplay.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Viewport;

/// A star that slowly falls down the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftStar {
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per drift step
    pub speed: f32,
}

/// A fixed star that pulses between half and full brightness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlickerStar {
    pub pos: Vec2,
    pub size: f32,
    /// Seconds per pulse
    pub period: f32,
}

impl FlickerStar {
    /// Opacity at `time` seconds: 0.5 at the start of a pulse, 1.0 halfway
    pub fn brightness(&self, time: f64) -> f32 {
        let phase = (time / f64::from(self.period)).fract() as f32;
        let tri = 1.0 - (2.0 * phase - 1.0).abs();
        0.5 + 0.5 * tri
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub drifting: Vec<DriftStar>,
    pub flickering: Vec<FlickerStar>,
}

impl Starfield {
    pub fn new(seed: u64, viewport: &Viewport, drift_count: usize, flicker_count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let drifting = (0..drift_count)
            .map(|_| DriftStar {
                pos: random_point(&mut rng, viewport),
                size: rng.random::<f32>() * 2.0 + 1.0,
                speed: rng.random::<f32>() * 0.5 + 0.1,
            })
            .collect();
        let flickering = (0..flicker_count)
            .map(|_| FlickerStar {
                pos: random_point(&mut rng, viewport),
                size: rng.random::<f32>() * 3.0 + 2.0,
                period: rng.random::<f32>() * 0.1 + 0.05,
            })
            .collect();
        Self {
            drifting,
            flickering,
        }
    }

    /// Move every drifting star down by its speed, wrapping at the bottom
    pub fn drift(&mut self, viewport: &Viewport) {
        if viewport.height <= 0.0 {
            return;
        }
        for star in &mut self.drifting {
            star.pos.y = (star.pos.y + star.speed).rem_euclid(viewport.height);
        }
    }
}

fn random_point<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * viewport.width,
        rng.random::<f32>() * viewport.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_ranges() {
        let vp = Viewport::new(800.0, 600.0);
        let field = Starfield::new(1, &vp, 200, 50);
        assert_eq!(field.drifting.len(), 200);
        assert_eq!(field.flickering.len(), 50);
        assert!(field.drifting.iter().all(|s| (1.0..3.0).contains(&s.size)));
        assert!(field.drifting.iter().all(|s| (0.1..0.6).contains(&s.speed)));
        assert!(field.flickering.iter().all(|s| (0.05..0.15).contains(&s.period)));
    }

    #[test]
    fn test_drift_wraps_vertically() {
        let vp = Viewport::new(100.0, 100.0);
        let mut field = Starfield {
            drifting: vec![DriftStar {
                pos: Vec2::new(10.0, 99.8),
                size: 1.0,
                speed: 0.5,
            }],
            flickering: Vec::new(),
        };
        field.drift(&vp);
        assert!((field.drifting[0].pos.y - 0.3).abs() < 1e-4);
        assert_eq!(field.drifting[0].pos.x, 10.0);
    }

    #[test]
    fn test_flicker_pulse() {
        let star = FlickerStar {
            pos: Vec2::ZERO,
            size: 2.0,
            period: 0.1,
        };
        assert!((star.brightness(0.0) - 0.5).abs() < 1e-5);
        assert!((star.brightness(0.05) - 1.0).abs() < 1e-3);
        assert!((0.5..=1.0).contains(&star.brightness(12.3456)));
    }
}
