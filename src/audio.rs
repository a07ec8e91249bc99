//! Soundtrack output
//!
//! The simulation only ever sends start, stop and mute signals. Playback
//! failures are reported to the caller, which logs them and carries on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    /// The host has no usable audio output
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    /// The host refused to start playback (autoplay policy, decode error, ...)
    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// An owned handle to the game's audio output
pub trait AudioOutput {
    /// Start (or resume) the soundtrack
    fn play(&mut self) -> Result<(), AudioError>;

    /// Stop and rewind to the beginning
    fn stop(&mut self);

    fn set_muted(&mut self, muted: bool);
}

/// Output that plays nothing; used headless and in tests
#[derive(Debug, Default)]
pub struct SilentAudio {
    pub playing: bool,
    pub muted: bool,
}

impl AudioOutput for SilentAudio {
    fn play(&mut self) -> Result<(), AudioError> {
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::MusicTrack;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    use super::{AudioError, AudioOutput};

    /// Looping background music backed by an `<audio>` element
    pub struct MusicTrack {
        element: Option<HtmlAudioElement>,
    }

    impl MusicTrack {
        pub fn new(url: &str, volume: f32) -> Self {
            let element = match HtmlAudioElement::new_with_src(url) {
                Ok(el) => {
                    el.set_loop(true);
                    el.set_volume(f64::from(volume.clamp(0.0, 1.0)));
                    Some(el)
                }
                Err(err) => {
                    log::warn!("Failed to create audio element - audio disabled: {:?}", err);
                    None
                }
            };
            Self { element }
        }
    }

    impl AudioOutput for MusicTrack {
        fn play(&mut self) -> Result<(), AudioError> {
            let el = self
                .element
                .as_ref()
                .ok_or_else(|| AudioError::Unavailable("no audio element".into()))?;
            let promise = el
                .play()
                .map_err(|err| AudioError::Rejected(format!("{:?}", err)))?;

            // Browsers settle the autoplay decision asynchronously
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    let reason = err
                        .dyn_ref::<js_sys::Error>()
                        .map(|e| String::from(e.message()))
                        .unwrap_or_else(|| format!("{:?}", err));
                    log::warn!("Audio play failed: {}", reason);
                }
            });
            Ok(())
        }

        fn stop(&mut self) {
            if let Some(el) = &self.element {
                let _ = el.pause();
                el.set_current_time(0.0);
            }
        }

        fn set_muted(&mut self, muted: bool) {
            if let Some(el) = &self.element {
                el.set_muted(muted);
            }
        }
    }
}
