//! Polyline geometry resolution.
//!
//! Each instance of a [`PointStore`] is drawn twice per frame, four vertices
//! each:
//!
//! - the **segment pass** connects point `i` to its cyclic successor, unless
//!   point `i` ends an open path (`forward`);
//! - the **cap/join pass** resolves point `i` as a cap when exactly one of the
//!   segments touching it is missing, or as a join when both exist.
//!
//! Resolution is a pure function of the store contents and the style. Inputs
//! that have no direction (coincident points) produce no geometry rather
//! than non-finite vertices.

use bytemuck::Zeroable;
use linework_core::color::Rgba;
use linework_core::math::{Vec2, lerp, lerp_vec2, perp, sign_or_zero, try_normalize};

use crate::batch::{LineBatch, PointStore, PolylinePoint};
use crate::style::{CapStyle, JoinStyle, LineStyle};
use crate::vertex::{FLAG_CAP, FLAG_JOIN, LineVertex};

/// Parametric quad corners `(dx, dy)`: `dx` across the stroke, `dy` along it.
const QUAD_CORNERS: [(f32, f32); 4] = [(-0.5, 0.0), (0.5, 0.0), (-0.5, 1.0), (0.5, 1.0)];

/// The two instanced draws issued per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinePass {
    Segments,
    CapsJoins,
}

/// What a resolved quad represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadKind {
    Segment,
    Cap(CapStyle),
    Join(JoinStyle),
}

/// Four strip-ordered vertices for one instance in one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineQuad {
    pub kind: QuadKind,
    pub vertices: [LineVertex; 4],
}

impl LineQuad {
    pub fn positions(&self) -> [Vec2; 4] {
        self.vertices.map(|v| v.position())
    }
}

/// Which end of an open path a cap sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathEnd {
    Start,
    End,
}

/// Resolves quads for every instance of a store under one style.
pub struct LineResolver<'a, S: PointStore + ?Sized> {
    store: &'a S,
    style: LineStyle,
}

impl<'a, S: PointStore + ?Sized> LineResolver<'a, S> {
    pub fn new(store: &'a S, style: LineStyle) -> Self {
        Self { store, style }
    }

    pub fn style(&self) -> LineStyle {
        self.style
    }

    /// Resolve instance `index` for `pass`.
    pub fn quad(&self, pass: LinePass, index: usize) -> Option<LineQuad> {
        match pass {
            LinePass::Segments => self.segment(index),
            LinePass::CapsJoins => self.cap_join(index),
        }
    }

    /// A single vertex of an instance, as the vertex stage would compute it.
    ///
    /// Instances without geometry resolve to a zeroed (zero-area) vertex.
    pub fn vertex(&self, pass: LinePass, instance: usize, vertex: usize) -> LineVertex {
        assert!(vertex < 4, "quad vertex index {vertex} out of range");
        self.quad(pass, instance)
            .map(|quad| quad.vertices[vertex])
            .unwrap_or_else(LineVertex::zeroed)
    }

    /// Segment from point `index` to its successor.
    ///
    /// With [`CapStyle::Arrow`], a segment ending at a path end is pulled back
    /// by twice the end half-width to leave room for the arrowhead, or by its
    /// whole length when it is shorter than that.
    pub fn segment(&self, index: usize) -> Option<LineQuad> {
        let curr = self.store.point(index);
        if curr.forward {
            return None;
        }
        let next = self.store.point(self.store.next_index(index));
        let delta = next.position - curr.position;
        let dir = try_normalize(delta)?;
        let side = perp(dir);
        let pull_back = if self.style.cap == CapStyle::Arrow && next.forward {
            arrow_length(next.half_width, delta.norm())
        } else {
            0.0
        };

        let vertices = QUAD_CORNERS.map(|(dx, dy)| {
            let center = lerp_vec2(curr.position, next.position, dy) - dir * pull_back * dy;
            let half_width = lerp(curr.half_width, next.half_width, dy);
            LineVertex::new(
                center + side * half_width * 2.0 * dx,
                [dx + 0.5, dy],
                curr.color.lerp(next.color, dy),
                0,
            )
        });

        Some(LineQuad {
            kind: QuadKind::Segment,
            vertices,
        })
    }

    /// Cap or join at point `index`, chosen by which neighboring segments exist.
    pub fn cap_join(&self, index: usize) -> Option<LineQuad> {
        let curr = self.store.point(index);
        let prev = self.store.point(self.store.prev_index(index));

        match (prev.forward, curr.forward) {
            // Isolated point.
            (true, true) => None,
            (true, false) => {
                let next = self.store.point(self.store.next_index(index));
                self.cap(&curr, &next, PathEnd::Start)
            }
            (false, true) => self.cap(&curr, &prev, PathEnd::End),
            (false, false) => {
                let next = self.store.point(self.store.next_index(index));
                self.join(&prev, &curr, &next)
            }
        }
    }

    /// Resolve both passes for every instance.
    pub fn resolve(&self) -> LineGeometry {
        let capacity = self.store.capacity();
        LineGeometry {
            segments: (0..capacity).map(|i| self.segment(i)).collect(),
            caps_joins: (0..capacity).map(|i| self.cap_join(i)).collect(),
        }
    }

    fn cap(&self, curr: &PolylinePoint, adjacent: &PolylinePoint, end: PathEnd) -> Option<LineQuad> {
        // Points away from the path.
        let delta = curr.position - adjacent.position;
        let dir = try_normalize(delta)?;
        let hw = curr.half_width;

        let (style, span) = match (self.style.cap, end) {
            (CapStyle::None, _) => return None,
            (CapStyle::Square, _) | (CapStyle::Arrow, PathEnd::Start) => (
                CapStyle::Square,
                Span {
                    from: 0.0,
                    to: hw,
                    from_half: hw,
                    to_half: hw,
                    flags: 0,
                },
            ),
            (CapStyle::Triangle, _) => (
                CapStyle::Triangle,
                Span {
                    from: 0.0,
                    to: hw,
                    from_half: hw,
                    to_half: 0.0,
                    flags: 0,
                },
            ),
            // Base sits where the shortened segment stops, tip on the end point.
            (CapStyle::Arrow, PathEnd::End) => (
                CapStyle::Arrow,
                Span {
                    from: -arrow_length(hw, delta.norm()),
                    to: 0.0,
                    from_half: 2.0 * hw,
                    to_half: 0.0,
                    flags: 0,
                },
            ),
            (CapStyle::Round, _) => (
                CapStyle::Round,
                Span {
                    from: -hw,
                    to: hw,
                    from_half: hw,
                    to_half: hw,
                    flags: FLAG_CAP,
                },
            ),
        };

        Some(LineQuad {
            kind: QuadKind::Cap(style),
            vertices: span.vertices(curr.position, dir, curr.color),
        })
    }

    fn join(
        &self,
        prev: &PolylinePoint,
        curr: &PolylinePoint,
        next: &PolylinePoint,
    ) -> Option<LineQuad> {
        if self.style.join == JoinStyle::None {
            return None;
        }

        let dir_prev = try_normalize(curr.position - prev.position)?;
        let dir_curr = try_normalize(next.position - curr.position)?;
        let hw = curr.half_width;

        if self.style.join == JoinStyle::Round {
            let span = Span {
                from: -hw,
                to: hw,
                from_half: hw,
                to_half: hw,
                flags: FLAG_JOIN,
            };
            return Some(LineQuad {
                kind: QuadKind::Join(JoinStyle::Round),
                vertices: span.vertices(curr.position, dir_curr, curr.color),
            });
        }

        let perp_prev = perp(dir_prev);
        let perp_curr = perp(dir_curr);
        // Outer side of the turn; zero when the segments are collinear.
        let sigma = sign_or_zero(dir_prev.dot(&perp_curr));
        let point0 = curr.position + perp_prev * hw * sigma;
        let point1 = curr.position + perp_curr * hw * sigma;

        let miter = match self.style.join {
            JoinStyle::Miter => self.miter_tip(curr.position, dir_prev, dir_curr, hw, sigma),
            _ => None,
        };
        let (kind, last) = match miter {
            Some(tip) => (JoinStyle::Miter, tip),
            None => (JoinStyle::Bevel, curr.position),
        };

        let color = curr.color;
        Some(LineQuad {
            kind: QuadKind::Join(kind),
            vertices: [
                LineVertex::new(curr.position, [0.0, 0.0], color, 0),
                LineVertex::new(point0, [1.0, 0.0], color, 0),
                LineVertex::new(point1, [0.0, 1.0], color, 0),
                LineVertex::new(last, [1.0, 1.0], color, 0),
            ],
        })
    }

    /// Miter tip, or `None` when the turn is (nearly) straight or the tip
    /// would lie further than `miter_limit` half-widths from the joint.
    fn miter_tip(
        &self,
        center: Vec2,
        dir_prev: Vec2,
        dir_curr: Vec2,
        hw: f32,
        sigma: f32,
    ) -> Option<Vec2> {
        let miter_dir = try_normalize(dir_prev - dir_curr)?;
        let denom = miter_dir.dot(&perp(dir_prev));
        // Tip distance is hw / |denom|; compare without dividing.
        if denom.abs() * self.style.miter_limit < 1.0 || denom == 0.0 {
            log::trace!("Miter limit exceeded (ratio {}), using bevel", 1.0 / denom.abs());
            return None;
        }
        let length = hw / denom;
        Some(center + miter_dir * length * sigma)
    }
}

/// Distance the arrowhead reaches back from the path end, never past the
/// start of the final segment.
fn arrow_length(half_width: f32, segment_length: f32) -> f32 {
    (2.0 * half_width).min(segment_length)
}

/// A quad laid along `dir`: from `from` to `to` (distances along `dir` from
/// the anchor), with half-widths `from_half` and `to_half` across it.
struct Span {
    from: f32,
    to: f32,
    from_half: f32,
    to_half: f32,
    flags: u32,
}

impl Span {
    fn vertices(&self, anchor: Vec2, dir: Vec2, color: Rgba) -> [LineVertex; 4] {
        let side = perp(dir);
        QUAD_CORNERS.map(|(dx, dy)| {
            let center = anchor + dir * lerp(self.from, self.to, dy);
            let half_width = lerp(self.from_half, self.to_half, dy);
            LineVertex::new(
                center + side * half_width * 2.0 * dx,
                [dx + 0.5, dy],
                color,
                self.flags,
            )
        })
    }
}

/// Resolved quads for both passes, one slot per instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineGeometry {
    pub segments: Vec<Option<LineQuad>>,
    pub caps_joins: Vec<Option<LineQuad>>,
}

impl LineGeometry {
    pub fn pass(&self, pass: LinePass) -> &[Option<LineQuad>] {
        match pass {
            LinePass::Segments => &self.segments,
            LinePass::CapsJoins => &self.caps_joins,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.iter().flatten().count()
    }

    pub fn cap_count(&self) -> usize {
        self.caps_joins
            .iter()
            .flatten()
            .filter(|q| matches!(q.kind, QuadKind::Cap(_)))
            .count()
    }

    pub fn join_count(&self) -> usize {
        self.caps_joins
            .iter()
            .flatten()
            .filter(|q| matches!(q.kind, QuadKind::Join(_)))
            .count()
    }

    /// Flatten a pass to `4 × instances` vertices; empty slots become zero-area quads.
    pub fn vertex_buffer(&self, pass: LinePass) -> Vec<LineVertex> {
        self.pass(pass)
            .iter()
            .flat_map(|quad| match quad {
                Some(quad) => quad.vertices,
                None => [LineVertex::zeroed(); 4],
            })
            .collect()
    }
}

/// Resolve a batch with its own style.
pub fn resolve(batch: &LineBatch) -> LineGeometry {
    LineResolver::new(batch, batch.style()).resolve()
}
