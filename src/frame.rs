//! Display-refresh scheduling
//!
//! The simulation advances once per refresh callback and re-arms itself for the
//! next one. `FrameLoop` owns the single outstanding request so stopping the
//! loop always deregisters it; a callback that arrives after `cancel` is
//! ignored.

/// Host handle for one requested refresh callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub i32);

/// The host's refresh service (`requestAnimationFrame` in a browser)
pub trait FrameScheduler {
    /// Ask for one callback on the next display refresh. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameId>;

    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, id: FrameId);
}

/// A cancellable repeating frame task
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<FrameId>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a callback is outstanding
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Request the next frame unless one is already outstanding
    pub fn arm<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        if self.pending.is_none() {
            self.pending = scheduler.request_frame();
            if self.pending.is_none() {
                log::warn!("Host refused a frame request; loop stalled");
            }
        }
        self.pending.is_some()
    }

    /// Accept a delivered callback. Returns `false` if nothing was outstanding,
    /// which means the loop was cancelled and the callback is stale.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Deregister the outstanding request, if any
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel_frame(id);
        }
    }
}
