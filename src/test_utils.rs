//! Test utilities shared by the unit and property tests.
//!
//! Fixtures build hand-placed entities and states; `ManualFrames` stands in
//! for the host's display-refresh service.

use crate::frame::{FrameId, FrameScheduler};

/// Fixtures for hand-built simulation states.
pub mod fixtures {
    use glam::Vec2;

    use crate::sim::spawn;
    use crate::sim::state::{Asteroid, GameState, Planet, Viewport};

    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    pub fn viewport() -> Viewport {
        Viewport::new(WIDTH, HEIGHT)
    }

    /// A motionless asteroid
    pub fn asteroid_at(pos: Vec2, size: f32) -> Asteroid {
        Asteroid::new(pos, Vec2::ZERO, size)
    }

    /// A grey planet that does not orbit
    pub fn planet(id: u64, distance: f32, angle: f32, size: f32) -> Planet {
        Planet {
            id,
            distance,
            angle,
            speed: 0.0,
            color: [0.5, 0.5, 0.5, 1.0],
            size,
        }
    }

    pub fn default_planets() -> Vec<Planet> {
        spawn::initial_planets()
    }

    /// A running game whose clock was last primed at `now`
    ///
    /// The spawn timer is pinned to `now` as well so the first ticks cannot
    /// drop a random asteroid in.
    pub fn playing_at(seed: u64, now: f64) -> GameState {
        let mut state = GameState::new(viewport(), seed).started();
        state.last_update_time = Some(now);
        state.last_asteroid_spawn = now;
        state
    }

    /// Like `playing_at` but with an empty sky
    pub fn empty_sky_at(seed: u64, now: f64) -> GameState {
        let mut state = playing_at(seed, now);
        state.planets.clear();
        state
    }
}

/// Frame service that only fires when the test says so
#[derive(Debug, Default)]
pub struct ManualFrames {
    next: i32,
    pending: Vec<FrameId>,
    pub cancelled: Vec<FrameId>,
}

impl ManualFrames {
    /// Requests still waiting to fire
    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    /// Deliver the oldest pending request, as the host would on a refresh
    pub fn fire(&mut self) -> Option<FrameId> {
        (!self.pending.is_empty()).then(|| self.pending.remove(0))
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> Option<FrameId> {
        self.next += 1;
        let id = FrameId(self.next);
        self.pending.push(id);
        Some(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.pending.retain(|&p| p != id);
        self.cancelled.push(id);
    }
}
