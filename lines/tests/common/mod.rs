//! Shared fixtures for line geometry integration tests.

use linework_core::color::Rgba;
use linework_core::math::{Vec2, vec2};
use linework_lines::{LineBatch, LineStyle};

pub const EPS: f32 = 1e-4;

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn near(a: Vec2, b: Vec2) -> bool {
    (a - b).norm() < EPS
}

/// Vertices of a regular polygon of `sides` sides around the origin, counter-clockwise.
pub fn regular_polygon(sides: usize, radius: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = i as f32 / sides as f32 * std::f32::consts::TAU;
            vec2(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// A batch whose points all connect to their successor.
pub fn closed_loop(points: &[Vec2], half_width: f32, style: LineStyle) -> LineBatch {
    let mut batch = LineBatch::with_capacity(points.len());
    batch.set_style(style);
    for (i, p) in points.iter().enumerate() {
        batch.set_point(i, *p, half_width, false, Rgba::WHITE);
    }
    batch
}

/// A batch forming one open path that ends at the last point.
pub fn open_path(points: &[Vec2], half_width: f32, style: LineStyle) -> LineBatch {
    let mut batch = closed_loop(points, half_width, style);
    let last = points.len() - 1;
    batch.set_point(last, points[last], half_width, true, Rgba::WHITE);
    batch
}
