//! Matching vertex formats against shader input signatures.
//!
//! [`LayoutResolver`] is stateless. It checks that a descriptor provides every
//! input a shader reads, turns the pair into an [`InputLayoutDesc`], and asks
//! the backend for the GPU resource. Caching lives in
//! [`FormatRegistry`](super::FormatRegistry).

use std::collections::BTreeSet;
use std::sync::Arc;

use case_core::vertex::{ElementType, VertexFormatDescriptor, VertexFormatId};
use thiserror::Error;

use super::desc::{InputElement, InputLayoutDesc, InputSlot};
use super::resolved::ResolvedLayout;
use super::signature::ShaderInputSignature;
use crate::backend::GpuBackend;
use crate::error::{LayoutError, Result};

/// A shader input whose type differs from the format's attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConflict {
    pub semantic_name: String,
    /// Type the shader reads.
    pub expected: ElementType,
    /// Type the vertex format provides.
    pub actual: ElementType,
}

/// A vertex format does not satisfy a shader's inputs.
///
/// `missing` and `type_conflicts` are what made validation fail. `extra` lists
/// attributes the format carries that the shader ignores; it is informational.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "vertex format '{format_id}' does not satisfy shader inputs: {}",
    describe_mismatch(.missing, .type_conflicts)
)]
pub struct MismatchError {
    pub format_id: VertexFormatId,
    pub missing: BTreeSet<String>,
    pub extra: BTreeSet<String>,
    pub type_conflicts: Vec<TypeConflict>,
}

fn describe_mismatch(missing: &BTreeSet<String>, type_conflicts: &[TypeConflict]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(String::as_str).collect();
        parts.push(format!("missing {}", names.join(", ")));
    }
    for conflict in type_conflicts {
        parts.push(format!(
            "{} is {} but shader reads {}",
            conflict.semantic_name, conflict.actual, conflict.expected
        ));
    }
    parts.join("; ")
}

/// Validates formats against signatures and builds input layouts.
pub struct LayoutResolver;

impl LayoutResolver {
    /// Check that `descriptor` provides every input in `signature`.
    ///
    /// Element types must match exactly; a `Float3` attribute does not satisfy
    /// a `Float4` input. When a semantic appears in several slots, any one of
    /// them with the right type satisfies the input.
    pub fn validate(
        descriptor: &VertexFormatDescriptor,
        signature: &ShaderInputSignature,
    ) -> std::result::Result<(), MismatchError> {
        let mut missing = BTreeSet::new();
        let mut type_conflicts: Vec<TypeConflict> = Vec::new();

        for input in signature.inputs() {
            let mut named = descriptor
                .attributes()
                .iter()
                .filter(|attr| attr.semantic_name == input.semantic_name)
                .peekable();
            let Some(first) = named.peek().copied() else {
                missing.insert(input.semantic_name.clone());
                continue;
            };
            if named.any(|attr| attr.element_type == input.element_type) {
                continue;
            }
            let conflict = TypeConflict {
                semantic_name: input.semantic_name.clone(),
                expected: input.element_type,
                actual: first.element_type,
            };
            if !type_conflicts.contains(&conflict) {
                type_conflicts.push(conflict);
            }
        }

        let extra: BTreeSet<String> = descriptor
            .attributes()
            .iter()
            .filter(|attr| {
                !signature
                    .inputs()
                    .iter()
                    .any(|input| input.semantic_name == attr.semantic_name)
            })
            .map(|attr| attr.semantic_name.clone())
            .collect();

        if missing.is_empty() && type_conflicts.is_empty() {
            if !extra.is_empty() {
                log::trace!(
                    "Format '{}' carries attributes unused by {}: {:?}",
                    descriptor.format_id(),
                    signature,
                    extra
                );
            }
            return Ok(());
        }

        Err(MismatchError {
            format_id: descriptor.format_id().clone(),
            missing,
            extra,
            type_conflicts,
        })
    }

    /// Validate, then produce the backend-neutral layout description.
    pub fn describe(
        descriptor: &VertexFormatDescriptor,
        signature: &ShaderInputSignature,
    ) -> std::result::Result<InputLayoutDesc, MismatchError> {
        Self::validate(descriptor, signature)?;

        let elements = signature
            .inputs()
            .iter()
            .zip(0u32..)
            .filter_map(|(input, location)| {
                descriptor
                    .attributes()
                    .iter()
                    .find(|attr| {
                        attr.semantic_name == input.semantic_name
                            && attr.element_type == input.element_type
                    })
                    .map(|attr| InputElement {
                        semantic_name: attr.semantic_name.clone(),
                        shader_location: location,
                        element_type: attr.element_type,
                        byte_offset: attr.byte_offset,
                        input_slot: attr.input_slot,
                    })
            })
            .collect();

        let slots = (0..descriptor.slot_count())
            .map(|slot| InputSlot {
                slot,
                stride: descriptor.slot_stride(slot),
            })
            .collect();

        Ok(InputLayoutDesc {
            format_id: descriptor.format_id().clone(),
            elements,
            slots,
        })
    }

    /// Validate, describe, and create the GPU input layout.
    ///
    /// Calls [`GpuBackend::create_input_layout`] exactly once when validation
    /// passes and never otherwise.
    pub fn build(
        descriptor: &VertexFormatDescriptor,
        signature: &ShaderInputSignature,
        backend: &Arc<dyn GpuBackend>,
    ) -> Result<ResolvedLayout> {
        let desc = Self::describe(descriptor, signature)?;

        log::debug!(
            "Creating input layout for '{}' {} on {}",
            desc.format_id,
            signature,
            backend.name()
        );

        let handle = backend
            .create_input_layout(&desc, signature)
            .map_err(|source| LayoutError::DeviceResource {
                format_id: desc.format_id.clone(),
                source,
            })?;

        Ok(ResolvedLayout::new(
            desc,
            signature.hash_value(),
            handle,
            backend,
        ))
    }
}
