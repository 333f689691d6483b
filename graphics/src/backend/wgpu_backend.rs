//! wgpu GPU backend.
//!
//! wgpu has no standalone input layout object; the vertex layout is part of
//! the render pipeline descriptor. This backend checks the layout against the
//! device limits and produces owned [`WgpuVertexBuffer`]s that pipeline
//! creation can borrow as `wgpu::VertexBufferLayout`s.

use case_core::vertex::ElementType;

use crate::layout::{InputLayoutDesc, ShaderInputSignature};

use super::{BackendError, GpuBackend, GpuInputLayout};

/// Owned form of a `wgpu::VertexBufferLayout`.
#[derive(Debug, Clone, PartialEq)]
pub struct WgpuVertexBuffer {
    pub array_stride: wgpu::BufferAddress,
    pub step_mode: wgpu::VertexStepMode,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

impl WgpuVertexBuffer {
    /// Borrow as a layout for `wgpu::VertexState::buffers`.
    pub fn layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: self.step_mode,
            attributes: &self.attributes,
        }
    }
}

/// Convert an element type to a wgpu vertex format.
pub fn convert_element_type(element_type: ElementType) -> wgpu::VertexFormat {
    match element_type {
        ElementType::Float1 => wgpu::VertexFormat::Float32,
        ElementType::Float2 => wgpu::VertexFormat::Float32x2,
        ElementType::Float3 => wgpu::VertexFormat::Float32x3,
        ElementType::Float4 => wgpu::VertexFormat::Float32x4,
    }
}

/// wgpu-based GPU backend.
#[derive(Debug, Clone)]
pub struct WgpuBackend {
    limits: wgpu::Limits,
}

impl WgpuBackend {
    /// Create a backend that checks layouts against the given limits.
    pub fn new(limits: wgpu::Limits) -> Self {
        Self { limits }
    }

    /// Create a backend for an existing device.
    pub fn from_device(device: &wgpu::Device) -> Self {
        Self::new(device.limits())
    }

    pub fn limits(&self) -> &wgpu::Limits {
        &self.limits
    }

    fn check_limits(&self, desc: &InputLayoutDesc) -> Result<(), BackendError> {
        BackendError::check_limit(
            "vertex buffer count",
            desc.slots.len() as u64,
            self.limits.max_vertex_buffers as u64,
        )?;
        BackendError::check_limit(
            "vertex attribute count",
            desc.elements.len() as u64,
            self.limits.max_vertex_attributes as u64,
        )?;
        BackendError::check_limit(
            "vertex buffer stride",
            desc.max_stride() as u64,
            self.limits.max_vertex_buffer_array_stride as u64,
        )
    }
}

impl GpuBackend for WgpuBackend {
    fn name(&self) -> &'static str {
        "wgpu Backend"
    }

    fn create_input_layout(
        &self,
        desc: &InputLayoutDesc,
        signature: &ShaderInputSignature,
    ) -> Result<GpuInputLayout, BackendError> {
        self.check_limits(desc)?;

        let buffers = desc
            .slots
            .iter()
            .map(|slot| WgpuVertexBuffer {
                array_stride: slot.stride as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: desc
                    .elements_in_slot(slot.slot)
                    .map(|element| wgpu::VertexAttribute {
                        format: convert_element_type(element.element_type),
                        offset: element.byte_offset as wgpu::BufferAddress,
                        shader_location: element.shader_location,
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();

        log::trace!(
            "WgpuBackend: input layout for '{}' {} ({} buffers)",
            desc.format_id,
            signature,
            buffers.len()
        );

        Ok(GpuInputLayout::Wgpu { buffers })
    }
}
