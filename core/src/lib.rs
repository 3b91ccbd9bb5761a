//! # Linework Core
//!
//! Shared building blocks for Linework: 2D math helpers, RGBA colors with
//! their packed wire representation, and platform-agnostic input tracking.

pub mod color;
pub mod input;
pub mod math;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core version. Hosts call this once after installing a logger.
pub fn init() {
    log::info!("Linework Core v{} initialized", VERSION);
}
