//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into one colored triangle list per
//! frame; the GPU side is a single pass-through pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::build_scene;
pub use vertex::Vertex;
