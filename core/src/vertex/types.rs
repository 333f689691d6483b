//! Typed vertex structs for the built-in formats.
//!
//! Each struct is `#[repr(C)]` and [`bytemuck::Pod`], so a slice of vertices
//! can be uploaded with `bytemuck::cast_slice`. Field order matches the
//! attribute order of the corresponding catalog entry.

use bytemuck::{Pod, Zeroable};

use super::format::VertexFormatId;

/// A vertex type with a known catalog format.
pub trait Vertex: Pod {
    /// The catalog format describing this struct.
    fn format_id() -> VertexFormatId;
}

/// Position only.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct SimpleVertex {
    pub position: [f32; 3],
}

/// Position + texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Position + texture coordinates + normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct TexturedNormalVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

/// Position + RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Position + RGBA color + normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ColoredNormalVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

/// Position + normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct NormalVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Full tangent-space vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct CompleteVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

macro_rules! impl_vertex {
    ($($ty:ty => $id:ident),* $(,)?) => {
        $(
            impl Vertex for $ty {
                fn format_id() -> VertexFormatId {
                    VertexFormatId::$id
                }
            }
        )*
    };
}

impl_vertex! {
    SimpleVertex => Simple,
    TexturedVertex => Textured,
    TexturedNormalVertex => TexturedNormal,
    ColoredVertex => Colored,
    ColoredNormalVertex => ColoredNormal,
    NormalVertex => Normal,
    CompleteVertex => Complete,
}
