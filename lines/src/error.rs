//! Line rendering error types.

use std::fmt;

/// Errors surfaced at the configuration and wire-format boundaries.
///
/// Geometry resolution itself never fails: degenerate input resolves to no
/// geometry, and caller contract violations (such as an out-of-range point
/// index) panic instead.
#[derive(Debug)]
pub enum LineError {
    /// A texel stream must hold two texels per instance.
    OddTexelCount(usize),
    /// A legacy float stream must hold six floats per instance.
    LegacyLength(usize),
    /// The miter limit must be finite and non-negative.
    InvalidMiterLimit(f32),
    /// A style configuration could not be parsed.
    Config(toml::de::Error),
    /// A line backend rejected an allocation, upload or draw.
    Backend(String),
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddTexelCount(count) => {
                write!(f, "texel count {count} is not a multiple of 2")
            }
            Self::LegacyLength(len) => {
                write!(f, "legacy instance stream length {len} is not a multiple of 6")
            }
            Self::InvalidMiterLimit(limit) => write!(f, "invalid miter limit: {limit}"),
            Self::Config(err) => write!(f, "invalid line style config: {err}"),
            Self::Backend(msg) => write!(f, "line backend error: {msg}"),
        }
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for LineError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err)
    }
}
