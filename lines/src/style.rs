//! Cap and join style selection.
//!
//! A [`LineStyle`] applies uniformly to every instance of a batch. It can be
//! built in code or loaded from TOML:
//!
//! ```toml
//! cap = "round"
//! join = "miter"
//! miter_limit = 4.0
//! ```

use serde::{Deserialize, Serialize};

use crate::error::LineError;

/// Geometry drawn at the open ends of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapStyle {
    /// Stroke ends flush with the end point.
    #[default]
    None,
    /// Rectangle extending half the stroke width past the end point.
    Square,
    /// Taper from full width to a point over half the stroke width.
    Triangle,
    /// Arrowhead at the path end; the tail gets a square cap.
    Arrow,
    /// Half-disc centered on the end point.
    Round,
}

impl CapStyle {
    /// Map a numeric wire value (0..=4).
    ///
    /// Out-of-range values select [`CapStyle::None`], which draws nothing.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Square,
            2 => Self::Triangle,
            3 => Self::Arrow,
            4 => Self::Round,
            other => {
                log::warn!("Unknown cap style {other}, drawing no caps");
                Self::None
            }
        }
    }
}

/// Geometry drawn where two segments of a path meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStyle {
    /// Leave the notch between segments open.
    #[default]
    None,
    /// Fill the notch with a single triangle.
    Bevel,
    /// Extend both outer edges to their intersection.
    Miter,
    /// Disc centered on the joint.
    Round,
}

impl JoinStyle {
    /// Map a numeric wire value (0..=3).
    ///
    /// Out-of-range values select [`JoinStyle::None`], which draws nothing.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Bevel,
            2 => Self::Miter,
            3 => Self::Round,
            other => {
                log::warn!("Unknown join style {other}, drawing no joins");
                Self::None
            }
        }
    }
}

/// Default ratio of miter tip distance to half-width before falling back to bevel.
pub const DEFAULT_MITER_LIMIT: f32 = 4.0;

/// Style pair plus the miter limit, shared by every instance of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub cap: CapStyle,
    pub join: JoinStyle,
    /// Maximum distance from the joint to the miter tip, in half-widths.
    ///
    /// Miters beyond this are drawn as bevels. A right angle needs `sqrt(2)`.
    pub miter_limit: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            cap: CapStyle::None,
            join: JoinStyle::None,
            miter_limit: DEFAULT_MITER_LIMIT,
        }
    }
}

impl LineStyle {
    pub fn new(cap: CapStyle, join: JoinStyle) -> Self {
        Self {
            cap,
            join,
            ..Self::default()
        }
    }

    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit;
        self
    }

    /// Check the miter limit.
    pub fn validate(&self) -> Result<(), LineError> {
        if !self.miter_limit.is_finite() || self.miter_limit < 0.0 {
            return Err(LineError::InvalidMiterLimit(self.miter_limit));
        }
        Ok(())
    }

    /// Parse and validate a style from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, LineError> {
        let style: Self = toml::from_str(source)?;
        style.validate()?;
        Ok(style)
    }
}
