//! Browser refresh scheduling via `requestAnimationFrame`

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::frame::{FrameId, FrameScheduler};

/// Registers one persistent callback with the browser on demand
///
/// The callback is created once and reused for every request. Cancel any
/// pending request before dropping this (see `Session::teardown`).
pub struct AnimationFrames {
    callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrames {
    pub fn new(on_frame: impl FnMut(f64) + 'static) -> Self {
        Self {
            callback: Closure::<dyn FnMut(f64)>::new(on_frame),
        }
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&mut self) -> Option<FrameId> {
        let window = web_sys::window()?;
        match window.request_animation_frame(self.callback.as_ref().unchecked_ref()) {
            Ok(id) => Some(FrameId(id)),
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {:?}", err);
                None
            }
        }
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(id.0);
        }
    }
}
