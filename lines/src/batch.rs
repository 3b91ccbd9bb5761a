use linework_core::color::Rgba;
use linework_core::math::Vec2;

use crate::style::{CapStyle, JoinStyle, LineStyle};

/// One vertex of a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylinePoint {
    pub position: Vec2,
    /// Half the stroke thickness at this point.
    pub half_width: f32,
    /// Marks the last point of an open path: no segment leaves this point.
    pub forward: bool,
    pub color: Rgba,
}

impl PolylinePoint {
    pub fn new(position: Vec2, half_width: f32, forward: bool, color: Rgba) -> Self {
        Self {
            position,
            half_width,
            forward,
            color,
        }
    }
}

impl Default for PolylinePoint {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            half_width: 0.0,
            forward: false,
            color: Rgba::TRANSPARENT,
        }
    }
}

/// Random-access store of polyline points, indexed cyclically.
///
/// Index `i`'s successor is `(i + 1) mod capacity` and its predecessor is
/// `(i - 1 + capacity) mod capacity`.
pub trait PointStore {
    fn capacity(&self) -> usize;

    /// Read slot `index`. Panics when `index >= capacity()`.
    fn point(&self, index: usize) -> PolylinePoint;

    fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }

    fn prev_index(&self, index: usize) -> usize {
        let capacity = self.capacity();
        (index + capacity - 1) % capacity
    }
}

/// Fixed-capacity point buffer plus the style applied to all of its instances.
///
/// Slots are overwritten in place with [`set_point`](Self::set_point); there is
/// no insertion or removal. Rebuilding with [`build`](Self::build) zeroes every
/// slot and invalidates any GPU-side mirror of the previous storage.
#[derive(Debug, Clone, Default)]
pub struct LineBatch {
    points: Vec<PolylinePoint>,
    style: LineStyle,
    generation: u64,
}

impl LineBatch {
    /// Create an empty batch (capacity 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a batch with `capacity` zeroed slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut batch = Self::new();
        batch.build(capacity);
        batch
    }

    /// Reallocate storage with `capacity` zeroed slots.
    ///
    /// All previous point data is lost.
    pub fn build(&mut self, capacity: usize) {
        self.points = vec![PolylinePoint::default(); capacity];
        self.generation += 1;
        log::debug!(
            "Line batch rebuilt with capacity {} (generation {})",
            capacity,
            self.generation
        );
    }

    /// Overwrite slot `index`.
    ///
    /// # Panics
    /// If `index >= capacity`.
    pub fn set_point(
        &mut self,
        index: usize,
        position: Vec2,
        half_width: f32,
        forward: bool,
        color: Rgba,
    ) {
        assert!(
            index < self.points.len(),
            "line point index {} out of range for capacity {}",
            index,
            self.points.len()
        );
        self.points[index] = PolylinePoint::new(position, half_width, forward, color);
    }

    pub fn points(&self) -> &[PolylinePoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn style(&self) -> LineStyle {
        self.style
    }

    pub fn set_style(&mut self, style: LineStyle) {
        self.style = style;
    }

    pub fn set_cap_style(&mut self, cap: CapStyle) {
        self.style.cap = cap;
    }

    pub fn set_join_style(&mut self, join: JoinStyle) {
        self.style.join = join;
    }

    /// Incremented by every [`build`](Self::build).
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl PointStore for LineBatch {
    fn capacity(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: usize) -> PolylinePoint {
        self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linework_core::math::vec2;

    #[test]
    fn test_new_batch_is_empty() {
        let batch = LineBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.capacity(), 0);
        assert_eq!(batch.generation(), 0);
    }

    #[test]
    fn test_build_zeroes_and_bumps_generation() {
        let mut batch = LineBatch::with_capacity(3);
        batch.set_point(1, vec2(1.0, 2.0), 0.5, true, Rgba::WHITE);
        assert_eq!(batch.generation(), 1);

        batch.build(4);
        assert_eq!(batch.capacity(), 4);
        assert_eq!(batch.generation(), 2);
        assert!(batch.points().iter().all(|p| *p == PolylinePoint::default()));
    }

    #[test]
    fn test_set_point() {
        let mut batch = LineBatch::with_capacity(2);
        batch.set_point(1, vec2(3.0, 4.0), 2.0, true, Rgba::BLACK);
        let p = batch.point(1);
        assert_eq!(p.position, vec2(3.0, 4.0));
        assert_eq!(p.half_width, 2.0);
        assert!(p.forward);
        assert_eq!(p.color, Rgba::BLACK);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_point_out_of_range() {
        let mut batch = LineBatch::with_capacity(2);
        batch.set_point(2, vec2(0.0, 0.0), 1.0, false, Rgba::WHITE);
    }

    #[test]
    fn test_cyclic_neighbors() {
        let batch = LineBatch::with_capacity(4);
        assert_eq!(batch.next_index(3), 0);
        assert_eq!(batch.next_index(1), 2);
        assert_eq!(batch.prev_index(0), 3);
        assert_eq!(batch.prev_index(2), 1);
    }

    #[test]
    fn test_style_setters() {
        let mut batch = LineBatch::new();
        batch.set_cap_style(CapStyle::Round);
        batch.set_join_style(JoinStyle::Bevel);
        assert_eq!(batch.style().cap, CapStyle::Round);
        assert_eq!(batch.style().join, JoinStyle::Bevel);
    }
}
