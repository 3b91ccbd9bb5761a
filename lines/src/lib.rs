//! Instanced polyline rendering for Linework.
//!
//! Every point of a [`LineBatch`] is one instance, drawn as a four-vertex quad
//! in each of two passes: a segment to the next point, and a cap or join at
//! the point itself. Points flagged `forward` end an open path; all other
//! points connect to their cyclic successor.
//!
//! # Architecture
//!
//! - [`LineBatch`]: fixed-capacity point storage plus the batch [`LineStyle`]
//! - [`LineResolver`]: turns any [`PointStore`] into quads for either pass
//! - [`LineMirror`]: keeps a [`LineBackend`] texel store in step with a batch
//! - [`CpuBackend`]: backend that resolves draws from the uploaded texels
//!
//! # Usage
//!
//! ```ignore
//! // Setup (once)
//! let mut batch = LineBatch::with_capacity(4);
//! batch.set_style(LineStyle::from_toml_str(r#"cap = "round"
//! join = "miter""#)?);
//! let mut mirror = LineMirror::new();
//!
//! // Each frame:
//! for (i, p) in path.iter().enumerate() {
//!     batch.set_point(i, p.position, p.half_width, i + 1 == path.len(), p.color);
//! }
//! mirror.submit(&batch, &mut backend)?;
//! ```

mod batch;
mod error;
mod mask;
mod mirror;
mod resolve;
mod style;
mod texel;
mod vertex;

pub use batch::{LineBatch, PointStore, PolylinePoint};
pub use error::LineError;
pub use mask::{disc_mask_discards, fragment_visible};
pub use mirror::{CpuBackend, LineBackend, LineMirror};
pub use resolve::{LineGeometry, LinePass, LineQuad, LineResolver, QuadKind, resolve};
pub use style::{CapStyle, DEFAULT_MITER_LIMIT, JoinStyle, LineStyle};
pub use texel::{
    LEGACY_FLOATS_PER_INSTANCE, TEXELS_PER_INSTANCE, TexelBuffer, decode_legacy, encode_legacy,
    encode_texels,
};
pub use vertex::{FLAG_CAP, FLAG_JOIN, LineVertex};
