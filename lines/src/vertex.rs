use linework_core::color::Rgba;
use linework_core::math::Vec2;

/// Set on round cap vertices: fragments outside the inscribed disc are discarded.
pub const FLAG_CAP: u32 = 1;
/// Set on round join vertices: fragments outside the inscribed disc are discarded.
pub const FLAG_JOIN: u32 = 2;

/// A resolved line vertex: screen-space position, quad-local uv, color and
/// fragment flags.
///
/// Every four consecutive vertices form one quad drawn as a triangle strip
/// (`0 1 2`, `1 2 3`).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    /// `(dx + 0.5, dy)` for the quad corner this vertex was built from.
    pub uv: [f32; 2],
    pub color: [f32; 4],
    /// [`FLAG_CAP`] / [`FLAG_JOIN`].
    pub flags: u32,
}

impl LineVertex {
    pub fn new(position: Vec2, uv: [f32; 2], color: Rgba, flags: u32) -> Self {
        Self {
            position: [position.x, position.y],
            uv,
            color: color.to_array(),
            flags,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.position[0], self.position[1])
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite()) && self.color.iter().all(|c| c.is_finite())
    }
}
