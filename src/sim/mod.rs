//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One `advance` per display refresh, driven by host timestamps
//! - Seeded RNG stored in the state
//! - Insertion-ordered entity lists
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod starfield;
pub mod state;
pub mod tick;

#[cfg(test)]
mod proptest_sim;

pub use collision::{CollisionOutcome, overlaps, resolve};
pub use spawn::Edge;
pub use starfield::Starfield;
pub use state::{Asteroid, Explosion, GamePhase, GameState, Planet, Sun, Viewport};
pub use tick::{TickInput, advance};
