//! Game session
//!
//! Owns the current `GameState` between ticks together with its collaborators:
//! held keys, the frame loop and the audio handle. Hosts forward events here
//! and read a `Snapshot` back after each frame.

use crate::audio::AudioOutput;
use crate::frame::{FrameLoop, FrameScheduler};
use crate::input::KeyState;
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, Viewport, advance, autopilot};
use crate::snapshot::Snapshot;

pub struct Session<A: AudioOutput> {
    state: GameState,
    keys: KeyState,
    frames: FrameLoop,
    audio: A,
    settings: Settings,
    autopilot: bool,
}

impl<A: AudioOutput> Session<A> {
    pub fn new(settings: Settings, viewport: Viewport, seed: u64, mut audio: A) -> Self {
        let state = GameState::new(viewport, seed).with_muted(settings.muted);
        audio.set_muted(state.muted);
        log::info!("Session created with seed: {}", seed);
        Self {
            state,
            keys: KeyState::new(),
            frames: FrameLoop::new(),
            audio,
            settings,
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn is_autopilot(&self) -> bool {
        self.autopilot
    }

    /// Whether a frame callback is outstanding
    pub fn is_running(&self) -> bool {
        self.frames.is_armed()
    }

    /// Key press from the host. The first press of the session starts the game.
    pub fn key_down<S: FrameScheduler + ?Sized>(&mut self, key: &str, scheduler: &mut S) {
        let first = self.keys.press(key);
        if first && !self.state.is_started() {
            self.start(scheduler);
            return;
        }
        match key {
            "m" | "M" => self.toggle_mute(),
            "i" | "I" => self.set_autopilot(!self.autopilot),
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.release(key);
    }

    /// Drop every held key, e.g. when the page loses focus
    pub fn release_keys(&mut self) {
        self.keys.release_all();
    }

    /// Leave the title screen, start the soundtrack and the frame loop
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.state.is_started() {
            return;
        }
        self.state = self.state.started();
        log::info!("Game started");

        if let Err(err) = self.audio.play() {
            log::warn!("Audio play failed: {}", err);
        }
        self.frames.arm(scheduler);
    }

    pub fn toggle_mute(&mut self) {
        self.state = self.state.with_muted(!self.state.muted);
        self.audio.set_muted(self.state.muted);
        log::info!("Muted: {}", self.state.muted);
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            self.autopilot = enabled;
            log::info!("Autopilot: {}", enabled);
        }
    }

    /// Refresh callback delivered by the host at timestamp `now` (ms).
    ///
    /// Returns whether the state advanced. Stale callbacks from a cancelled
    /// loop are ignored.
    pub fn on_frame<S: FrameScheduler + ?Sized>(&mut self, now: f64, scheduler: &mut S) -> bool {
        if !self.frames.fire() {
            return false;
        }

        let input = self.sample_input();
        self.state = advance(&self.state, &input, now);

        // Never re-armed once the game is over
        if self.state.is_active() {
            self.frames.arm(scheduler);
        }
        true
    }

    fn sample_input(&self) -> TickInput {
        if self.autopilot {
            autopilot::steer(&self.state)
        } else {
            self.keys.intent()
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.state = self.state.with_viewport(viewport);
    }

    /// Throw the current game away and return to the title screen
    pub fn restart<S: FrameScheduler + ?Sized>(&mut self, seed: u64, scheduler: &mut S) {
        self.frames.cancel(scheduler);
        self.audio.stop();
        self.state = GameState::new(self.state.viewport, seed).with_muted(self.state.muted);
        self.keys = KeyState::new();
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Stop the loop and the soundtrack
    pub fn teardown<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.frames.cancel(scheduler);
        self.audio.stop();
    }

    /// Pick a torn-down game back up, e.g. when the page is restored from the
    /// back/forward cache. The clock is primed again so the time away is skipped.
    pub fn resume<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if !self.state.is_active() || self.frames.is_armed() {
            return;
        }
        self.state.last_update_time = None;
        if let Err(err) = self.audio.play() {
            log::warn!("Audio play failed: {}", err);
        }
        self.frames.arm(scheduler);
        log::info!("Game resumed");
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::audio::{AudioError, SilentAudio};
    use crate::sim::GamePhase;
    use crate::test_utils::{ManualFrames, fixtures};

    fn session() -> Session<SilentAudio> {
        Session::new(
            Settings::default(),
            fixtures::viewport(),
            7,
            SilentAudio::default(),
        )
    }

    #[test]
    fn test_first_key_starts_game() {
        let mut frames = ManualFrames::default();
        let mut s = session();
        assert_eq!(s.state().phase, GamePhase::Title);

        s.key_down("x", &mut frames);
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert!(s.audio().playing);
        assert_eq!(frames.outstanding(), 1);

        // Later presses do not request more frames
        s.key_down("y", &mut frames);
        assert_eq!(frames.outstanding(), 1);
    }

    #[test]
    fn test_frames_advance_and_rearm() {
        let mut frames = ManualFrames::default();
        let mut s = session();
        s.start(&mut frames);

        frames.fire();
        assert!(s.on_frame(1000.0, &mut frames));
        frames.fire();
        assert!(s.on_frame(1016.0, &mut frames));
        assert!((s.state().score - 16.0 / 50.0).abs() < 1e-9);
        assert_eq!(frames.outstanding(), 1);
    }

    #[test]
    fn test_held_arrow_moves_sun() {
        let mut frames = ManualFrames::default();
        let mut s = session();
        s.key_down("ArrowLeft", &mut frames);

        frames.fire();
        s.on_frame(0.0, &mut frames);
        frames.fire();
        s.on_frame(50.0, &mut frames);
        assert!(s.state().sun.pos.x < fixtures::WIDTH / 2.0);

        s.key_up("ArrowLeft");
        let x = s.state().sun.pos.x;
        frames.fire();
        s.on_frame(100.0, &mut frames);
        assert_eq!(s.state().sun.pos.x, x);
    }

    #[test]
    fn test_loop_stops_at_game_over() {
        let mut frames = ManualFrames::default();
        let mut s = session();
        s.start(&mut frames);
        frames.fire();
        s.on_frame(0.0, &mut frames);

        // Drop an asteroid on the sun
        let sun = s.state().sun.pos;
        s.state.asteroids.push(fixtures::asteroid_at(sun, 20.0));
        frames.fire();
        assert!(s.on_frame(16.0, &mut frames));
        assert!(s.state().is_over());
        assert_eq!(frames.outstanding(), 0);
        assert!(!s.is_running());

        // A stray callback changes nothing
        let before = s.state().clone();
        assert!(!s.on_frame(32.0, &mut frames));
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn test_teardown_cancels_pending_frame() {
        let mut frames = ManualFrames::default();
        let mut s = session();
        s.start(&mut frames);

        s.teardown(&mut frames);
        assert_eq!(frames.outstanding(), 0);
        assert_eq!(frames.cancelled.len(), 1);
        assert!(!s.audio().playing);
        assert!(!s.on_frame(16.0, &mut frames));
    }

    #[test]
    fn test_resume_after_teardown() {
        let mut frames = ManualFrames::default();
        let mut s = session();
        s.start(&mut frames);
        frames.fire();
        s.on_frame(0.0, &mut frames);
        frames.fire();
        s.on_frame(16.0, &mut frames);
        let score = s.state().score;

        s.teardown(&mut frames);
        assert!(!s.is_running());

        s.resume(&mut frames);
        assert!(s.is_running());
        assert_eq!(frames.outstanding(), 1);
        assert!(s.audio().playing);

        // A second resume does not double-book the loop
        s.resume(&mut frames);
        assert_eq!(frames.outstanding(), 1);

        // A minute away is not simulated
        frames.fire();
        assert!(s.on_frame(60_000.0, &mut frames));
        assert_eq!(s.state().score, score);
        frames.fire();
        s.on_frame(60_016.0, &mut frames);
        assert!((s.state().score - score - 16.0 / 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_resume_ignores_idle_games() {
        let mut frames = ManualFrames::default();
        let mut s = session();
        s.resume(&mut frames);
        assert_eq!(s.state().phase, GamePhase::Title);
        assert!(!s.is_running());

        s.start(&mut frames);
        frames.fire();
        s.on_frame(0.0, &mut frames);
        let sun = s.state().sun.pos;
        s.state.asteroids.push(fixtures::asteroid_at(sun, 20.0));
        frames.fire();
        s.on_frame(16.0, &mut frames);
        assert!(s.state().is_over());

        s.resume(&mut frames);
        assert_eq!(frames.outstanding(), 0);
    }

    #[test]
    fn test_mute_toggle_reaches_audio() {
        let mut frames = ManualFrames::default();
        let mut s = session();
        s.start(&mut frames);
        s.key_down("m", &mut frames);
        assert!(s.state().muted && s.audio().muted);
        assert!(s.snapshot().is_muted);
        s.toggle_mute();
        assert!(!s.state().muted && !s.audio().muted);
    }

    #[test]
    fn test_muted_setting_applies_at_creation() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let s = Session::new(settings, fixtures::viewport(), 1, SilentAudio::default());
        assert!(s.state().muted);
        assert!(s.audio().muted);
    }

    #[test]
    fn test_restart_returns_to_title() {
        let mut frames = ManualFrames::default();
        let mut s = session();
        s.key_down("ArrowUp", &mut frames);
        s.toggle_mute();
        frames.fire();
        s.on_frame(0.0, &mut frames);

        s.restart(99, &mut frames);
        assert_eq!(s.state().phase, GamePhase::Title);
        assert_eq!(s.state().score, 0.0);
        assert!(s.state().muted);
        assert_eq!(frames.outstanding(), 0);

        // The next key press starts the new game
        s.key_down("ArrowDown", &mut frames);
        assert!(s.state().is_started());
    }

    #[test]
    fn test_resize_keeps_sun_visible() {
        let mut s = session();
        s.resize(Viewport::new(200.0, 200.0));
        let pos = s.state().sun.pos;
        assert!(pos.x <= 170.0 && pos.y <= 170.0);
        assert_eq!(s.snapshot().width, 200.0);
    }

    #[test]
    fn test_autopilot_toggle() {
        let mut frames = ManualFrames::default();
        let mut s = session();
        s.start(&mut frames);
        s.key_down("i", &mut frames);
        assert!(s.is_autopilot());

        // With nothing incoming and the sun at home, autopilot idles
        frames.fire();
        s.on_frame(0.0, &mut frames);
        frames.fire();
        s.on_frame(16.0, &mut frames);
        assert_eq!(s.state().sun.pos, Vec2::new(400.0, 300.0));
    }

    struct BlockedAudio;

    impl AudioOutput for BlockedAudio {
        fn play(&mut self) -> Result<(), AudioError> {
            Err(AudioError::Rejected("NotAllowedError".into()))
        }
        fn stop(&mut self) {}
        fn set_muted(&mut self, _muted: bool) {}
    }

    #[test]
    fn test_audio_failure_does_not_stop_game() {
        let mut frames = ManualFrames::default();
        let mut s = Session::new(Settings::default(), fixtures::viewport(), 3, BlockedAudio);
        s.start(&mut frames);
        assert!(s.state().is_started());
        assert_eq!(frames.outstanding(), 1);
    }
}
