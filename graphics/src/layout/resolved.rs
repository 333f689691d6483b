//! Resolved input layouts.

use std::sync::{Arc, Weak};

use case_core::vertex::VertexFormatId;

use super::desc::InputLayoutDesc;
use crate::backend::{GpuBackend, GpuInputLayout};

/// A GPU input layout built for one `(format, shader signature)` pair.
///
/// Shared through `Arc`. When the last reference goes away the GPU handle is
/// released through the backend that created it, unless that backend has
/// already been dropped (the device is gone and took the resource with it).
pub struct ResolvedLayout {
    format_id: VertexFormatId,
    signature_hash: u64,
    desc: InputLayoutDesc,
    gpu_handle: GpuInputLayout,
    backend: Weak<dyn GpuBackend>,
}

impl ResolvedLayout {
    pub(crate) fn new(
        desc: InputLayoutDesc,
        signature_hash: u64,
        gpu_handle: GpuInputLayout,
        backend: &Arc<dyn GpuBackend>,
    ) -> Self {
        Self {
            format_id: desc.format_id.clone(),
            signature_hash,
            desc,
            gpu_handle,
            backend: Arc::downgrade(backend),
        }
    }

    pub fn format_id(&self) -> &VertexFormatId {
        &self.format_id
    }

    /// Hash of the shader signature this layout was built for.
    pub fn signature_hash(&self) -> u64 {
        self.signature_hash
    }

    /// The backend-neutral description the handle was created from.
    pub fn desc(&self) -> &InputLayoutDesc {
        &self.desc
    }

    pub fn gpu_handle(&self) -> &GpuInputLayout {
        &self.gpu_handle
    }
}

impl std::fmt::Debug for ResolvedLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedLayout")
            .field("format_id", &self.format_id)
            .field("signature_hash", &format_args!("{:#018x}", self.signature_hash))
            .field("gpu_handle", &self.gpu_handle)
            .finish_non_exhaustive()
    }
}

impl Drop for ResolvedLayout {
    fn drop(&mut self) {
        if let Some(backend) = self.backend.upgrade() {
            log::trace!(
                "Releasing input layout for '{}' ({:#018x}) on {}",
                self.format_id,
                self.signature_hash,
                backend.name()
            );
            backend.release_input_layout(&self.gpu_handle);
        }
    }
}
