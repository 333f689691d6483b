//! Dummy GPU backend for testing and development.
//!
//! This backend doesn't perform actual GPU operations but provides
//! a valid implementation for exercising the layout cache without
//! requiring GPU hardware.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::layout::{InputLayoutDesc, ShaderInputSignature};

use super::{BackendError, GpuBackend, GpuInputLayout};

/// Dummy GPU backend.
///
/// Hands out increasing ids and counts created and released layouts.
#[derive(Debug, Default)]
pub struct DummyBackend {
    next_id: AtomicU64,
    created: AtomicU64,
    released: AtomicU64,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of input layouts created so far.
    pub fn created_layouts(&self) -> u64 {
        self.created.load(Ordering::Acquire)
    }

    /// Number of input layouts created and not yet released.
    pub fn live_layouts(&self) -> u64 {
        self.created_layouts() - self.released.load(Ordering::Acquire)
    }
}

impl GpuBackend for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn create_input_layout(
        &self,
        desc: &InputLayoutDesc,
        signature: &ShaderInputSignature,
    ) -> Result<GpuInputLayout, BackendError> {
        let id = self.next_id.fetch_add(1, Ordering::AcqRel);
        log::trace!(
            "DummyBackend: creating input layout {} for '{}' {} ({} elements, {} slots)",
            id,
            desc.format_id,
            signature,
            desc.elements.len(),
            desc.slots.len()
        );
        self.created.fetch_add(1, Ordering::AcqRel);
        Ok(GpuInputLayout::Dummy { id })
    }

    fn release_input_layout(&self, layout: &GpuInputLayout) {
        log::trace!("DummyBackend: releasing input layout {:?}", layout.dummy_id());
        self.released.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutResolver;
    use case_core::vertex::{ElementType, VertexFormatId, builtin_descriptor, semantics};

    #[test]
    fn test_ids_increase() {
        let backend = DummyBackend::new();
        let descriptor = builtin_descriptor(&VertexFormatId::Simple).unwrap();
        let signature =
            ShaderInputSignature::new().with_input(semantics::POSITION, ElementType::Float3);
        let desc = LayoutResolver::describe(&descriptor, &signature).unwrap();

        let a = backend.create_input_layout(&desc, &signature).unwrap();
        let b = backend.create_input_layout(&desc, &signature).unwrap();
        assert_eq!(a.dummy_id(), Some(0));
        assert_eq!(b.dummy_id(), Some(1));
        assert_eq!(backend.live_layouts(), 2);

        backend.release_input_layout(&a);
        assert_eq!(backend.created_layouts(), 2);
        assert_eq!(backend.live_layouts(), 1);
    }
}
