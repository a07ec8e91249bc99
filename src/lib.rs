//! In Orbit - guard your planets from an asteroid storm
//!
//! Core modules:
//! - `sim`: Per-frame simulation (orbits, spawning, collisions, scoring)
//! - `input`: Key-hold state to movement intent
//! - `frame`: Cancellable display-refresh scheduling
//! - `session`: Owns the state between ticks and wires the collaborators
//! - `snapshot`: Read-only per-tick view handed to presentation
//! - `renderer`: WebGPU presentation
//! - `audio`: Soundtrack output handle
//! - `platform`: Browser glue

pub mod audio;
pub mod frame;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_utils;

pub use session::Session;
pub use settings::{QualityPreset, Settings};
pub use snapshot::Snapshot;

use glam::Vec2;

/// Game configuration constants
///
/// Every time-scaled rule divides elapsed milliseconds by [`consts::TIME_SCALE`].
pub mod consts {
    /// Normalization divisor applied to elapsed milliseconds in every movement rule
    pub const TIME_SCALE: f32 = 50.0;

    /// Sun diameter (px)
    pub const SUN_SIZE: f32 = 60.0;
    pub const SUN_MAX_HEALTH: f32 = 100.0;
    /// Sun displacement per millisecond a direction key is held
    pub const SUN_SPEED: f32 = 0.3;

    /// Difficulty gains 1.0 per this many milliseconds of play
    pub const DIFFICULTY_RAMP_MS: f32 = 100_000.0;
    pub const MIN_DIFFICULTY: f32 = 1.0;
    pub const MAX_DIFFICULTY: f32 = 10.0;

    /// Base asteroid spawn interval at difficulty 1 (ms)
    pub const ASTEROID_SPAWN_INTERVAL_MS: f64 = 2000.0;
    /// Distance outside the viewport where asteroids spawn and despawn
    pub const EDGE_MARGIN: f32 = 50.0;
    pub const ASTEROID_MIN_SIZE: f32 = 10.0;
    pub const ASTEROID_SIZE_RANGE: f32 = 20.0;
    /// Velocity component spread per unit difficulty
    pub const ASTEROID_VELOCITY_SPREAD: f32 = 4.0;
    /// Maximum number of trail points kept per asteroid
    pub const TRAIL_LENGTH: usize = 50;
    /// Peak trail point opacity
    pub const TRAIL_MAX_ALPHA: f32 = 0.7;

    /// Planet spawn probability per TIME_SCALE milliseconds
    pub const PLANET_SPAWN_CHANCE: f32 = 0.005;
    pub const PLANET_MIN_DISTANCE: f32 = 150.0;
    pub const PLANET_DISTANCE_RANGE: f32 = 200.0;
    pub const PLANET_MIN_SPEED: f32 = 0.005;
    pub const PLANET_SPEED_RANGE: f32 = 0.02;
    pub const PLANET_MIN_SIZE: f32 = 15.0;
    pub const PLANET_SIZE_RANGE: f32 = 15.0;

    /// Health lost for every planet destroyed
    pub const PLANET_LOSS_DAMAGE: f32 = 20.0;
    pub const SUN_HIT_EXPLOSION_SIZE: f32 = 100.0;
    pub const PLANET_HIT_EXPLOSION_SIZE: f32 = 50.0;

    /// Default soundtrack
    pub const MUSIC_URL: &str = "audio/orbit-soundtrack.mp3";
    pub const MUSIC_VOLUME: f32 = 0.5;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// RGBA color with components in 0..=1
pub type Color = [f32; 4];

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to opaque RGBA
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_to_cartesian_axes() {
        let p = polar_to_cartesian(100.0, 0.0);
        assert!((p.x - 100.0).abs() < 1e-4 && p.y.abs() < 1e-4);

        let p = polar_to_cartesian(10.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-4 && (p.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = hsl_to_rgba(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 1e-5 && red[1].abs() < 1e-5 && red[2].abs() < 1e-5);

        let blue = hsl_to_rgba(240.0, 1.0, 0.5);
        assert!(blue[0].abs() < 1e-5 && blue[1].abs() < 1e-5 && (blue[2] - 1.0).abs() < 1e-5);

        // Hue wraps
        assert_eq!(hsl_to_rgba(360.0, 0.7, 0.5), hsl_to_rgba(0.0, 0.7, 0.5));
    }
}
