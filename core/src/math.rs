//! Math type aliases and helper functions.
//!
//! All rendering math is f32 and two-dimensional. Helpers here never
//! produce non-finite values from finite input: direction vectors go
//! through [`try_normalize`], which refuses degenerate lengths.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// Squared length below which a vector is treated as having no direction.
pub const DEGENERATE_EPSILON: f32 = 1e-12;

/// Construct a [`Vec2`] from components.
#[inline]
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two vectors.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Counter-clockwise perpendicular: `(-v.y, v.x)`.
#[inline]
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Normalize `v`, or `None` when it is too short to carry a direction.
#[inline]
pub fn try_normalize(v: Vec2) -> Option<Vec2> {
    let len_sq = v.norm_squared();
    if len_sq <= DEGENERATE_EPSILON || !len_sq.is_finite() {
        return None;
    }
    Some(v / len_sq.sqrt())
}

/// Sign of `x` with `0.0` mapped to `0.0` (GLSL `sign` semantics).
///
/// [`f32::signum`] returns `1.0` for `+0.0`, which would push a collinear
/// join to one side of the stroke.
#[inline]
pub fn sign_or_zero(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// True when both components are finite.
#[inline]
pub fn is_finite_vec2(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

/// Convert to a plain `[x, y]` array.
#[inline]
pub fn vec2_to_array(v: Vec2) -> [f32; 2] {
    [v.x, v.y]
}
