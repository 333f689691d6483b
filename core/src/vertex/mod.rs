//! Vertex formats.
//!
//! This module describes how vertex data is laid out in memory so that the
//! graphics crate can bind it to shader inputs:
//!
//! - [`ElementType`] - Data type of one attribute (`Float1` .. `Float4`)
//! - [`AttributeDescriptor`] - Semantic, offset, type and input slot of one attribute
//! - [`VertexFormatDescriptor`] - A complete, validated vertex layout
//! - [`VertexFormatCatalog`] - Table of known formats (`format_id -> descriptor`)
//! - [`types`] - `#[repr(C)]` structs matching the built-in formats
//!
//! Descriptors are immutable once built and shared via `Arc`, since only a
//! handful of formats exist across many meshes.

mod catalog;
mod descriptor;
mod format;
pub mod types;

pub use catalog::{VertexFormatCatalog, builtin_descriptor};
pub use descriptor::{AttributeDescriptor, VertexFormatBuilder, VertexFormatDescriptor};
pub use format::{ElementType, VertexFormatId, semantics};
pub use types::{
    ColoredNormalVertex, ColoredVertex, CompleteVertex, NormalVertex, SimpleVertex,
    TexturedNormalVertex, TexturedVertex, Vertex,
};
