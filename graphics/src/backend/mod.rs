//! GPU backend abstraction layer.
//!
//! The backend is the only part of this crate that talks to a GPU API. The
//! layout resolver hands it a backend-neutral [`InputLayoutDesc`] and gets an
//! API-specific [`GpuInputLayout`] back.
//!
//! # Available Backends
//!
//! - `dummy` (always available): No-op backend for testing and development
//! - `wgpu-backend`: Vertex buffer layouts for wgpu pipelines
//! - `vulkan-backend`: Vertex input state for Vulkan pipelines via ash

#[cfg(feature = "wgpu-backend")]
pub mod wgpu_backend;

#[cfg(feature = "vulkan-backend")]
pub mod vulkan;

pub mod dummy;
mod error;

pub use dummy::DummyBackend;
pub use error::BackendError;

#[cfg(feature = "vulkan-backend")]
use ash::vk;

use crate::layout::{InputLayoutDesc, ShaderInputSignature};

/// Handle to a GPU input layout resource.
pub enum GpuInputLayout {
    /// Dummy backend (no GPU allocation)
    Dummy {
        /// Unique id assigned by the dummy backend.
        id: u64,
    },
    /// wgpu vertex buffer layouts, one per input slot
    #[cfg(feature = "wgpu-backend")]
    Wgpu {
        buffers: Vec<wgpu_backend::WgpuVertexBuffer>,
    },
    /// Vulkan vertex input bindings and attributes
    #[cfg(feature = "vulkan-backend")]
    Vulkan {
        bindings: Vec<vk::VertexInputBindingDescription>,
        attributes: Vec<vk::VertexInputAttributeDescription>,
    },
}

impl GpuInputLayout {
    /// Get the dummy id, if this layout came from the dummy backend.
    pub fn dummy_id(&self) -> Option<u64> {
        match self {
            Self::Dummy { id } => Some(*id),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu { .. } => None,
            #[cfg(feature = "vulkan-backend")]
            Self::Vulkan { .. } => None,
        }
    }

    /// Get the wgpu vertex buffer layouts for pipeline creation.
    #[cfg(feature = "wgpu-backend")]
    pub fn buffer_layouts(&self) -> Option<Vec<wgpu::VertexBufferLayout<'_>>> {
        match self {
            Self::Wgpu { buffers } => Some(buffers.iter().map(|b| b.layout()).collect()),
            _ => None,
        }
    }

    /// Get the Vulkan vertex input state for pipeline creation.
    #[cfg(feature = "vulkan-backend")]
    pub fn vulkan_vertex_input_state(&self) -> Option<vk::PipelineVertexInputStateCreateInfo<'_>> {
        match self {
            Self::Vulkan {
                bindings,
                attributes,
            } => Some(
                vk::PipelineVertexInputStateCreateInfo::default()
                    .vertex_binding_descriptions(bindings)
                    .vertex_attribute_descriptions(attributes),
            ),
            _ => None,
        }
    }
}

impl std::fmt::Debug for GpuInputLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dummy { id } => f.debug_struct("GpuInputLayout::Dummy").field("id", id).finish(),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu { buffers } => f
                .debug_struct("GpuInputLayout::Wgpu")
                .field("buffers", buffers)
                .finish(),
            #[cfg(feature = "vulkan-backend")]
            Self::Vulkan {
                bindings,
                attributes,
            } => f
                .debug_struct("GpuInputLayout::Vulkan")
                .field("bindings", &bindings.len())
                .field("attributes", &attributes.len())
                .finish_non_exhaustive(),
        }
    }
}

/// GPU backend trait for abstracting different GPU APIs.
pub trait GpuBackend: Send + Sync + 'static {
    /// Get the backend name.
    fn name(&self) -> &'static str;

    /// Create an input layout resource.
    ///
    /// `desc` lists only the attributes the shader consumes, already bound to
    /// shader locations; `signature` is the shader signature it was validated
    /// against.
    fn create_input_layout(
        &self,
        desc: &InputLayoutDesc,
        signature: &ShaderInputSignature,
    ) -> Result<GpuInputLayout, BackendError>;

    /// Release an input layout resource.
    ///
    /// Called once per created layout when its last reference is dropped.
    fn release_input_layout(&self, _layout: &GpuInputLayout) {}
}

static_assertions::assert_impl_all!(GpuInputLayout: Send, Sync);
