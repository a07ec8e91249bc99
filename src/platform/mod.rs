//! Platform glue
//!
//! Hosts provide the display-refresh service the session runs on:
//! - `headless`: a fixed-rate virtual clock for native runs and tests
//! - `web`: `requestAnimationFrame` in the browser

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod web;
