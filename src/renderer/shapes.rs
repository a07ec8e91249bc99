//! Shape generation for 2D primitives
//!
//! All coordinates are in pixels with the origin at the top-left corner.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::Color;

fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    center + radius * Vec2::new(theta.cos(), theta.sin())
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let a = on_circle(center, radius, i as f32 / segments as f32 * TAU);
        let b = on_circle(center, radius, (i + 1) as f32 / segments as f32 * TAU);

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }

    vertices
}

/// Approximate a radial gradient with stacked discs, outermost first
///
/// `stops` pairs a fraction of `radius` with the color at that radius.
pub fn radial_disc(center: Vec2, radius: f32, stops: &[(f32, Color)], segments: u32) -> Vec<Vertex> {
    let mut stops = stops.to_vec();
    stops.sort_by(|a, b| b.0.total_cmp(&a.0));
    stops
        .iter()
        .filter(|(t, _)| *t > 0.0)
        .flat_map(|&(t, color)| circle(center, radius * t, color, segments))
        .collect()
}

/// Quad between two radii over `[theta1, theta2]`
fn band(center: Vec2, inner: f32, outer: f32, theta1: f32, theta2: f32, color: Color) -> [Vertex; 6] {
    let i1 = on_circle(center, inner, theta1);
    let o1 = on_circle(center, outer, theta1);
    let i2 = on_circle(center, inner, theta2);
    let o2 = on_circle(center, outer, theta2);
    [
        Vertex::new(i1.x, i1.y, color),
        Vertex::new(o1.x, o1.y, color),
        Vertex::new(i2.x, i2.y, color),
        Vertex::new(i2.x, i2.y, color),
        Vertex::new(o1.x, o1.y, color),
        Vertex::new(o2.x, o2.y, color),
    ]
}

/// Dashed circle outline; `dash` is the length of each dash and gap in pixels
pub fn dashed_ring(center: Vec2, radius: f32, width: f32, dash: f32, color: Color) -> Vec<Vertex> {
    if radius <= 0.0 || dash <= 0.0 {
        return Vec::new();
    }
    let dashes = ((TAU * radius) / (2.0 * dash)).floor().max(1.0) as u32;
    let step = TAU / dashes as f32;
    let inner = (radius - width / 2.0).max(0.0);
    let outer = radius + width / 2.0;

    (0..dashes)
        .flat_map(|i| {
            let start = i as f32 * step;
            band(center, inner, outer, start, start + step / 2.0, color)
        })
        .collect()
}

/// Asteroid trail: one half-size dot per `(position, opacity)` point
pub fn trail_dots(
    dots: impl IntoIterator<Item = (Vec2, f32)>,
    asteroid_size: f32,
    color: Color,
    segments: u32,
) -> Vec<Vertex> {
    dots.into_iter()
        .flat_map(|(pos, alpha)| {
            circle(pos, asteroid_size / 4.0, [color[0], color[1], color[2], alpha], segments)
        })
        .collect()
}
