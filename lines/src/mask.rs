//! Fragment-stage coverage for round caps and joins.
//!
//! Round caps and joins are drawn as squares of side `2 * halfWidth`
//! centered on the point; the fragment stage discards everything outside the
//! inscribed disc, leaving a disc of radius `halfWidth`.

use crate::vertex::{FLAG_CAP, FLAG_JOIN};

/// True when a fragment at quad-local `uv` lies outside the inscribed disc.
#[inline]
pub fn disc_mask_discards(uv: [f32; 2]) -> bool {
    let x = uv[0] * 2.0 - 1.0;
    let y = uv[1] * 2.0 - 1.0;
    x * x + y * y > 1.0
}

/// Whether a fragment survives, given the flags of the quad it belongs to.
#[inline]
pub fn fragment_visible(flags: u32, uv: [f32; 2]) -> bool {
    if flags & (FLAG_CAP | FLAG_JOIN) != 0 {
        !disc_mask_discards(uv)
    } else {
        true
    }
}
