//! RGBA colors and the packed-channel wire codec.
//!
//! Colors travel through the pipeline as a plain [`Rgba`] quadruple. Only
//! the instance store at the rasterization boundary uses the packed form,
//! where the three color channels share one f32:
//!
//! ```text
//! packed = r8 + g8 * 256 + b8 * 65536      (each channel quantized to 0..=255)
//! ```
//!
//! The largest packed value is `2^24 - 1`, which f32 represents exactly.

use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color, each channel in `[0, 1]`.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Per-channel linear interpolation.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Pack the color channels with [`pack_rgb256`]; alpha travels separately.
    pub fn pack_rgb(self) -> f32 {
        pack_rgb256(self.r, self.g, self.b)
    }

    /// Rebuild a color from a packed RGB value and a separate alpha.
    pub fn from_packed(packed: f32, alpha: f32) -> Self {
        let (r, g, b) = unpack_rgb256(packed);
        Self::new(r, g, b, alpha)
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(c: [f32; 4]) -> Self {
        Self::from_array(c)
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

#[inline]
fn quantize(channel: f32) -> u32 {
    // NaN clamps to NaN and casts to 0.
    (channel.clamp(0.0, 1.0) * 255.0).round() as u32
}

/// Pack three `[0, 1]` channels into one exactly-representable f32.
///
/// Channels are clamped, then quantized to 8 bits.
pub fn pack_rgb256(r: f32, g: f32, b: f32) -> f32 {
    let packed = quantize(r) + quantize(g) * 256 + quantize(b) * 65536;
    packed as f32
}

/// Inverse of [`pack_rgb256`]: `(value mod 256) / 255` per channel.
pub fn unpack_rgb256(packed: f32) -> (f32, f32, f32) {
    let v = if packed.is_finite() { packed.max(0.0) as u32 } else { 0 };
    let r = (v % 256) as f32 / 255.0;
    let g = ((v / 256) % 256) as f32 / 255.0;
    let b = ((v / 65536) % 256) as f32 / 255.0;
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_primaries() {
        assert_eq!(pack_rgb256(1.0, 0.0, 0.0), 255.0);
        assert_eq!(pack_rgb256(0.0, 1.0, 0.0), 255.0 * 256.0);
        assert_eq!(pack_rgb256(0.0, 0.0, 1.0), 255.0 * 65536.0);
        assert_eq!(pack_rgb256(1.0, 1.0, 1.0), 16_777_215.0);
    }

    #[test]
    fn test_pack_clamps_out_of_range() {
        assert_eq!(pack_rgb256(2.0, -1.0, 0.0), 255.0);
        assert_eq!(pack_rgb256(f32::NAN, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_unpack_quantized() {
        // 0.5 * 255 is a midpoint and rounds away from zero.
        let (r, g, b) = unpack_rgb256(pack_rgb256(0.2, 0.5, 0.8));
        assert_eq!(r, 51.0 / 255.0);
        assert_eq!(g, 128.0 / 255.0);
        assert_eq!(b, 204.0 / 255.0);

        let (r, g, b) = unpack_rgb256(pack_rgb256(51.0 / 255.0, 128.0 / 255.0, 230.0 / 255.0));
        assert_eq!((r, g, b), (51.0 / 255.0, 128.0 / 255.0, 230.0 / 255.0));
    }

    #[test]
    fn test_unpack_garbage_is_black() {
        assert_eq!(unpack_rgb256(f32::NAN), (0.0, 0.0, 0.0));
        assert_eq!(unpack_rgb256(-5.0), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_color_lerp() {
        let c = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_eq!(c, Rgba::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_from_packed_keeps_alpha() {
        let c = Rgba::from_packed(Rgba::new(1.0, 0.0, 1.0, 0.25).pack_rgb(), 0.25);
        assert_eq!(c, Rgba::new(1.0, 0.0, 1.0, 0.25));
    }
}
