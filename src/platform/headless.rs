//! Virtual refresh clock
//!
//! Grants at most one outstanding frame and delivers it at the next fixed step,
//! so a whole game can be played as fast as the CPU allows.

use crate::frame::{FrameId, FrameScheduler};

#[derive(Debug)]
pub struct SteppedFrames {
    next_id: i32,
    pending: Option<FrameId>,
    now: f64,
    step_ms: f64,
    delivered: u64,
}

impl SteppedFrames {
    /// Clock ticking at `hz` refreshes per second, starting at `start_ms`
    pub fn new(hz: f64, start_ms: f64) -> Self {
        Self {
            next_id: 0,
            pending: None,
            now: start_ms,
            step_ms: 1000.0 / hz.max(1.0),
            delivered: 0,
        }
    }

    /// Timestamp of the most recent delivery (ms)
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Advance the clock and deliver the pending request. `None` once the
    /// loop has stopped asking for frames.
    pub fn next_frame(&mut self) -> Option<f64> {
        self.pending.take()?;
        self.now += self.step_ms;
        self.delivered += 1;
        Some(self.now)
    }
}

impl FrameScheduler for SteppedFrames {
    fn request_frame(&mut self) -> Option<FrameId> {
        if self.pending.is_some() {
            return self.pending;
        }
        self.next_id += 1;
        self.pending = Some(FrameId(self.next_id));
        self.pending
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}
