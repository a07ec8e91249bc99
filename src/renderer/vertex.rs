//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    // Sun gradient, core to rim
    pub const SUN_CORE: [f32; 4] = [1.0, 0.969, 0.0, 1.0];
    pub const SUN_MID: [f32; 4] = [1.0, 0.6, 0.0, 1.0];
    pub const SUN_RIM: [f32; 4] = [1.0, 0.4, 0.0, 1.0];

    // Asteroid gradient
    pub const ASTEROID_CORE: [f32; 4] = [1.0, 0.6, 0.0, 1.0];
    pub const ASTEROID_MID: [f32; 4] = [1.0, 0.4, 0.0, 1.0];
    pub const ASTEROID_RIM: [f32; 4] = [1.0, 0.271, 0.0, 1.0];
    pub const TRAIL: [f32; 4] = [1.0, 0.647, 0.0, 1.0];

    // Explosion gradient
    pub const EXPLOSION_CORE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const EXPLOSION_MID: [f32; 4] = [1.0, 0.647, 0.0, 1.0];
    pub const EXPLOSION_RIM: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    /// Scale the RGB channels, leaving alpha alone
    pub fn dimmed(color: [f32; 4], factor: f32) -> [f32; 4] {
        [
            color[0] * factor,
            color[1] * factor,
            color[2] * factor,
            color[3],
        ]
    }

    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }
}
