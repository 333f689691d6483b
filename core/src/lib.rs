//! # Case Engine Core
//!
//! GPU-agnostic vertex data for Case Engine: element types, attribute and
//! format descriptors, the built-in format catalog, and the typed vertex
//! structs that renderers upload.

pub mod error;
pub mod vertex;

pub use error::{FormatError, Result};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core library version.
pub fn init() {
    log::info!("Case Core v{} initialized", VERSION);
}
