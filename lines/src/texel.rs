//! Per-instance wire layout read by the rasterization boundary.
//!
//! Each instance occupies two RGBA float texels:
//!
//! | texel | r | g | b | a |
//! |-------|---|---|---|---|
//! | 0 | x | y | half-width | forward (0/1) |
//! | 1 | 0 | 0 | packed RGB | alpha |
//!
//! The older six-float layout `(x, y, width, option, packedRGB, alpha)` has no
//! forward flag; decoded legacy streams form one path that ends at the last
//! instance.

use linework_core::color::Rgba;
use linework_core::math::vec2;

use crate::batch::{PointStore, PolylinePoint};
use crate::error::LineError;

pub const TEXELS_PER_INSTANCE: usize = 2;
pub const LEGACY_FLOATS_PER_INSTANCE: usize = 6;

/// Serialize every slot of `store` into the two-texel layout.
pub fn encode_texels<S: PointStore + ?Sized>(store: &S) -> Vec<[f32; 4]> {
    let mut texels = Vec::with_capacity(store.capacity() * TEXELS_PER_INSTANCE);
    for index in 0..store.capacity() {
        let point = store.point(index);
        texels.push([
            point.position.x,
            point.position.y,
            point.half_width,
            if point.forward { 1.0 } else { 0.0 },
        ]);
        texels.push([0.0, 0.0, point.color.pack_rgb(), point.color.a]);
    }
    texels
}

/// Serialize `store` into the six-float layout. The forward flag is dropped.
pub fn encode_legacy<S: PointStore + ?Sized>(store: &S) -> Vec<f32> {
    let mut floats = Vec::with_capacity(store.capacity() * LEGACY_FLOATS_PER_INSTANCE);
    for index in 0..store.capacity() {
        let point = store.point(index);
        floats.extend_from_slice(&[
            point.position.x,
            point.position.y,
            point.half_width * 2.0,
            0.0,
            point.color.pack_rgb(),
            point.color.a,
        ]);
    }
    floats
}

/// Points decoded from a wire stream, readable by the resolver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TexelBuffer {
    points: Vec<PolylinePoint>,
}

impl TexelBuffer {
    /// Decode a two-texel-per-instance stream.
    ///
    /// A forward value of `0.5` or more reads as set.
    pub fn from_texels(texels: &[[f32; 4]]) -> Result<Self, LineError> {
        if texels.len() % TEXELS_PER_INSTANCE != 0 {
            return Err(LineError::OddTexelCount(texels.len()));
        }
        let points = texels
            .chunks_exact(TEXELS_PER_INSTANCE)
            .map(|pair| {
                let [x, y, half_width, forward] = pair[0];
                let [_, _, packed, alpha] = pair[1];
                PolylinePoint::new(
                    vec2(x, y),
                    half_width,
                    forward >= 0.5,
                    Rgba::from_packed(packed, alpha),
                )
            })
            .collect();
        Ok(Self { points })
    }

    /// Decode a six-float-per-instance stream.
    pub fn from_legacy(floats: &[f32]) -> Result<Self, LineError> {
        if floats.len() % LEGACY_FLOATS_PER_INSTANCE != 0 {
            return Err(LineError::LegacyLength(floats.len()));
        }
        let count = floats.len() / LEGACY_FLOATS_PER_INSTANCE;
        let points = floats
            .chunks_exact(LEGACY_FLOATS_PER_INSTANCE)
            .enumerate()
            .map(|(index, record)| {
                PolylinePoint::new(
                    vec2(record[0], record[1]),
                    record[2] * 0.5,
                    index + 1 == count,
                    Rgba::from_packed(record[4], record[5]),
                )
            })
            .collect();
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PolylinePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<PolylinePoint> {
        self.points
    }
}

impl PointStore for TexelBuffer {
    fn capacity(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: usize) -> PolylinePoint {
        self.points[index]
    }
}

/// Decode a six-float stream straight into points.
pub fn decode_legacy(floats: &[f32]) -> Result<Vec<PolylinePoint>, LineError> {
    TexelBuffer::from_legacy(floats).map(TexelBuffer::into_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::LineBatch;

    fn sample_batch() -> LineBatch {
        let mut batch = LineBatch::with_capacity(3);
        batch.set_point(0, vec2(0.0, 0.0), 1.0, false, Rgba::new(1.0, 0.0, 0.0, 1.0));
        batch.set_point(1, vec2(10.0, 0.0), 2.0, false, Rgba::new(0.0, 1.0, 0.0, 0.5));
        batch.set_point(2, vec2(10.0, 5.0), 0.5, true, Rgba::new(0.0, 0.0, 1.0, 0.25));
        batch
    }

    #[test]
    fn test_encode_layout() {
        let texels = encode_texels(&sample_batch());
        assert_eq!(texels.len(), 6);
        assert_eq!(texels[0], [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(texels[1], [0.0, 0.0, 255.0, 1.0]);
        assert_eq!(texels[3], [0.0, 0.0, 255.0 * 256.0, 0.5]);
        assert_eq!(texels[4], [10.0, 5.0, 0.5, 1.0]);
        assert_eq!(texels[5], [0.0, 0.0, 255.0 * 65536.0, 0.25]);
    }

    #[test]
    fn test_decode_matches_batch() {
        let batch = sample_batch();
        let decoded = TexelBuffer::from_texels(&encode_texels(&batch)).unwrap();
        assert_eq!(decoded.points(), batch.points());
    }

    #[test]
    fn test_odd_texel_count_rejected() {
        let err = TexelBuffer::from_texels(&[[0.0; 4]; 3]).unwrap_err();
        assert!(matches!(err, LineError::OddTexelCount(3)));
    }

    #[test]
    fn test_legacy_layout() {
        let floats = encode_legacy(&sample_batch());
        assert_eq!(floats.len(), 18);
        assert_eq!(&floats[6..12], &[10.0, 0.0, 4.0, 0.0, 255.0 * 256.0, 0.5]);
    }

    #[test]
    fn test_legacy_decode_ends_path_at_last_point() {
        let points = decode_legacy(&encode_legacy(&sample_batch())).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].half_width, 2.0);
        assert!(!points[0].forward);
        assert!(!points[1].forward);
        assert!(points[2].forward);
    }

    #[test]
    fn test_legacy_length_rejected() {
        assert!(matches!(
            decode_legacy(&[0.0; 7]),
            Err(LineError::LegacyLength(7))
        ));
    }

    #[test]
    fn test_empty_streams() {
        assert_eq!(TexelBuffer::from_texels(&[]).unwrap().capacity(), 0);
        assert!(decode_legacy(&[]).unwrap().is_empty());
    }
}
