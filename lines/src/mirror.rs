use crate::batch::{LineBatch, PointStore};
use crate::error::LineError;
use crate::resolve::{LinePass, LineResolver};
use crate::style::LineStyle;
use crate::texel::{TEXELS_PER_INSTANCE, TexelBuffer, encode_texels};
use crate::vertex::LineVertex;

/// The rasterization side of line rendering.
///
/// A backend owns the instance texel store and issues instanced quad draws
/// that read from it. Every draw covers `4 × instance_count` vertices.
pub trait LineBackend {
    /// Discard the current texel store and allocate `texel_count` texels.
    fn allocate_texels(&mut self, texel_count: usize) -> Result<(), LineError>;

    /// Overwrite the texel store from the start.
    fn upload_texels(&mut self, texels: &[[f32; 4]]) -> Result<(), LineError>;

    /// Draw one pass over `instance_count` instances.
    fn draw_quads(
        &mut self,
        pass: LinePass,
        style: LineStyle,
        instance_count: usize,
    ) -> Result<(), LineError>;
}

/// Keeps a backend's texel store in step with a [`LineBatch`].
///
/// Create once per batch. Each frame, call [`submit`](Self::submit) after
/// updating the batch's points.
#[derive(Debug, Default)]
pub struct LineMirror {
    generation: Option<u64>,
    texel_capacity: usize,
}

impl LineMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texels allocated on the backend by the last reallocation.
    pub fn texel_capacity(&self) -> usize {
        self.texel_capacity
    }

    /// Upload `batch` and draw its segment and cap/join passes.
    ///
    /// The backend store is reallocated whenever the batch was rebuilt since
    /// the previous submit or its capacity differs from the current store.
    /// Empty batches draw nothing.
    pub fn submit<B: LineBackend + ?Sized>(
        &mut self,
        batch: &LineBatch,
        backend: &mut B,
    ) -> Result<(), LineError> {
        if batch.is_empty() {
            return Ok(());
        }

        let instance_count = batch.capacity();
        let texel_count = instance_count * TEXELS_PER_INSTANCE;
        if self.generation != Some(batch.generation()) || self.texel_capacity != texel_count {
            backend.allocate_texels(texel_count)?;
            log::debug!(
                "Line mirror reallocated {} texels for generation {}",
                texel_count,
                batch.generation()
            );
            self.generation = Some(batch.generation());
            self.texel_capacity = texel_count;
        }

        backend.upload_texels(&encode_texels(batch))?;

        let style = batch.style();
        backend.draw_quads(LinePass::Segments, style, instance_count)?;
        backend.draw_quads(LinePass::CapsJoins, style, instance_count)?;

        log::trace!("Submitted {} line instances", instance_count);
        Ok(())
    }
}

/// Backend that resolves draws on the CPU from the texels it was given.
///
/// Decodes exactly what a GPU would read, so it doubles as a reference for
/// the full encode, upload and draw path.
#[derive(Debug, Default)]
pub struct CpuBackend {
    texels: Vec<[f32; 4]>,
    allocations: usize,
    segments: Vec<LineVertex>,
    caps_joins: Vec<LineVertex>,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocations performed so far.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn texels(&self) -> &[[f32; 4]] {
        &self.texels
    }

    /// Vertices produced by the most recent draw of `pass`.
    pub fn vertices(&self, pass: LinePass) -> &[LineVertex] {
        match pass {
            LinePass::Segments => &self.segments,
            LinePass::CapsJoins => &self.caps_joins,
        }
    }
}

impl LineBackend for CpuBackend {
    fn allocate_texels(&mut self, texel_count: usize) -> Result<(), LineError> {
        self.texels = vec![[0.0; 4]; texel_count];
        self.allocations += 1;
        Ok(())
    }

    fn upload_texels(&mut self, texels: &[[f32; 4]]) -> Result<(), LineError> {
        if texels.len() > self.texels.len() {
            return Err(LineError::Backend(format!(
                "upload of {} texels exceeds allocation of {}",
                texels.len(),
                self.texels.len()
            )));
        }
        self.texels[..texels.len()].copy_from_slice(texels);
        Ok(())
    }

    fn draw_quads(
        &mut self,
        pass: LinePass,
        style: LineStyle,
        instance_count: usize,
    ) -> Result<(), LineError> {
        let store = TexelBuffer::from_texels(&self.texels)?;
        if instance_count > store.capacity() {
            return Err(LineError::Backend(format!(
                "draw of {} instances exceeds store of {}",
                instance_count,
                store.capacity()
            )));
        }

        let resolver = LineResolver::new(&store, style);
        let vertices: Vec<LineVertex> = (0..instance_count)
            .flat_map(|instance| (0..4).map(move |vertex| (instance, vertex)))
            .map(|(instance, vertex)| resolver.vertex(pass, instance, vertex))
            .collect();

        match pass {
            LinePass::Segments => self.segments = vertices,
            LinePass::CapsJoins => self.caps_joins = vertices,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use crate::style::{CapStyle, JoinStyle};
    use linework_core::color::Rgba;
    use linework_core::math::vec2;

    fn triangle_batch() -> LineBatch {
        let mut batch = LineBatch::with_capacity(3);
        batch.set_style(LineStyle::new(CapStyle::Square, JoinStyle::Bevel));
        batch.set_point(0, vec2(0.0, 0.0), 1.0, false, Rgba::WHITE);
        batch.set_point(1, vec2(8.0, 0.0), 1.0, false, Rgba::WHITE);
        batch.set_point(2, vec2(8.0, 8.0), 1.0, true, Rgba::WHITE);
        batch
    }

    #[test]
    fn test_submit_matches_direct_resolve() {
        let batch = triangle_batch();
        let mut mirror = LineMirror::new();
        let mut backend = CpuBackend::new();
        mirror.submit(&batch, &mut backend).unwrap();

        let geometry = resolve(&batch);
        assert_eq!(
            backend.vertices(LinePass::Segments),
            geometry.vertex_buffer(LinePass::Segments).as_slice()
        );
        assert_eq!(
            backend.vertices(LinePass::CapsJoins),
            geometry.vertex_buffer(LinePass::CapsJoins).as_slice()
        );
        assert_eq!(backend.vertices(LinePass::Segments).len(), 12);
    }

    #[test]
    fn test_reallocates_only_on_rebuild() {
        let mut batch = triangle_batch();
        let mut mirror = LineMirror::new();
        let mut backend = CpuBackend::new();

        mirror.submit(&batch, &mut backend).unwrap();
        batch.set_point(1, vec2(9.0, 0.0), 1.0, false, Rgba::BLACK);
        mirror.submit(&batch, &mut backend).unwrap();
        assert_eq!(backend.allocations(), 1);
        assert_eq!(mirror.texel_capacity(), 6);
        assert_eq!(backend.texels()[2], [9.0, 0.0, 1.0, 0.0]);

        batch.build(5);
        mirror.submit(&batch, &mut backend).unwrap();
        assert_eq!(backend.allocations(), 2);
        assert_eq!(mirror.texel_capacity(), 10);
        assert_eq!(backend.vertices(LinePass::CapsJoins).len(), 20);
    }

    #[test]
    fn test_reallocates_for_other_batch_with_same_generation() {
        let small = triangle_batch();
        let mut large = LineBatch::with_capacity(4);
        large.set_point(0, vec2(0.0, 0.0), 1.0, false, Rgba::WHITE);
        large.set_point(3, vec2(4.0, 4.0), 1.0, true, Rgba::WHITE);
        assert_eq!(small.generation(), large.generation());

        let mut mirror = LineMirror::new();
        let mut backend = CpuBackend::new();
        mirror.submit(&small, &mut backend).unwrap();
        mirror.submit(&large, &mut backend).unwrap();
        assert_eq!(backend.allocations(), 2);
        assert_eq!(mirror.texel_capacity(), 8);
        assert_eq!(backend.vertices(LinePass::Segments).len(), 16);
    }

    #[test]
    fn test_empty_batch_draws_nothing() {
        let batch = LineBatch::new();
        let mut mirror = LineMirror::new();
        let mut backend = CpuBackend::new();
        mirror.submit(&batch, &mut backend).unwrap();
        assert_eq!(backend.allocations(), 0);
        assert!(backend.vertices(LinePass::Segments).is_empty());
    }

    #[test]
    fn test_upload_beyond_allocation_fails() {
        let mut backend = CpuBackend::new();
        backend.allocate_texels(2).unwrap();
        let err = backend.upload_texels(&[[0.0; 4]; 4]).unwrap_err();
        assert!(matches!(err, LineError::Backend(_)));
    }
}
