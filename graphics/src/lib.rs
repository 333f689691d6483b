//! # Case Engine Graphics
//!
//! Vertex input layout resolution for Case Engine renderers.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`FormatRegistry`] - Vertex format catalog with a per-device layout cache
//! - [`LayoutResolver`] - Validates a vertex format against a shader's inputs
//! - [`GpuBackend`] - Trait for the GPU API that creates input layouts
//! - [`gui`] - Scoped egui context for debug overlays
//! - Multiple backend support: Vulkan, wgpu, and Dummy (for testing)
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use case_core::vertex::{ElementType, VertexFormatId, semantics};
//! use case_graphics::{DummyBackend, FormatRegistry, LayoutError, ShaderInputSignature};
//!
//! let registry = FormatRegistry::new(Arc::new(DummyBackend::new()));
//! let signature = ShaderInputSignature::new()
//!     .with_input(semantics::POSITION, ElementType::Float3)
//!     .with_input(semantics::NORMAL, ElementType::Float3);
//!
//! match registry.resolve(&VertexFormatId::Simple, &signature) {
//!     Err(LayoutError::Mismatch(err)) => assert!(err.missing.contains(semantics::NORMAL)),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

pub mod backend;
pub mod error;
pub mod gui;
pub mod layout;

// Re-export main types for convenience
pub use backend::{BackendError, DummyBackend, GpuBackend, GpuInputLayout};
pub use error::{LayoutError, Result};
pub use gui::{GuiContext, GuiFrame, GuiSettings};
pub use layout::{
    FormatRegistry, InputLayoutDesc, LayoutResolver, MismatchError, RegistryParameters,
    RegistryStats, ResolvedLayout, ShaderInputSignature, TypeConflict,
};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the graphics subsystem.
///
/// Logs the versions of this crate and `case-core`.
pub fn init() {
    case_core::init();
    log::info!("Case Graphics v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_dummy_backend() {
        let backend = DummyBackend::new();
        assert_eq!(backend.name(), "Dummy Backend");
    }
}
