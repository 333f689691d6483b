//! Vulkan GPU backend.
//!
//! Translates layouts into `vk::VertexInputBindingDescription`s and
//! `vk::VertexInputAttributeDescription`s for
//! `vk::PipelineVertexInputStateCreateInfo`, after checking them against the
//! physical device limits.

use ash::vk;
use case_core::vertex::ElementType;

use crate::layout::{InputLayoutDesc, ShaderInputSignature};

use super::{BackendError, GpuBackend, GpuInputLayout};

/// Convert an element type to a Vulkan format.
pub fn convert_element_type(element_type: ElementType) -> vk::Format {
    match element_type {
        ElementType::Float1 => vk::Format::R32_SFLOAT,
        ElementType::Float2 => vk::Format::R32G32_SFLOAT,
        ElementType::Float3 => vk::Format::R32G32B32_SFLOAT,
        ElementType::Float4 => vk::Format::R32G32B32A32_SFLOAT,
    }
}

/// Vulkan-based GPU backend.
pub struct VulkanBackend {
    limits: vk::PhysicalDeviceLimits,
}

impl VulkanBackend {
    /// Create a backend that checks layouts against the given device limits.
    pub fn new(limits: vk::PhysicalDeviceLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &vk::PhysicalDeviceLimits {
        &self.limits
    }

    fn check_limits(&self, desc: &InputLayoutDesc) -> Result<(), BackendError> {
        BackendError::check_limit(
            "vertex input binding count",
            desc.slots.len() as u64,
            self.limits.max_vertex_input_bindings as u64,
        )?;
        BackendError::check_limit(
            "vertex input attribute count",
            desc.elements.len() as u64,
            self.limits.max_vertex_input_attributes as u64,
        )?;
        BackendError::check_limit(
            "vertex input binding stride",
            desc.max_stride() as u64,
            self.limits.max_vertex_input_binding_stride as u64,
        )?;
        BackendError::check_limit(
            "vertex input attribute offset",
            desc.max_attribute_offset() as u64,
            self.limits.max_vertex_input_attribute_offset as u64,
        )
    }
}

impl std::fmt::Debug for VulkanBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VulkanBackend")
            .field("max_vertex_input_bindings", &self.limits.max_vertex_input_bindings)
            .field(
                "max_vertex_input_attributes",
                &self.limits.max_vertex_input_attributes,
            )
            .finish_non_exhaustive()
    }
}

impl GpuBackend for VulkanBackend {
    fn name(&self) -> &'static str {
        "Vulkan Backend"
    }

    fn create_input_layout(
        &self,
        desc: &InputLayoutDesc,
        signature: &ShaderInputSignature,
    ) -> Result<GpuInputLayout, BackendError> {
        self.check_limits(desc)?;

        let bindings: Vec<vk::VertexInputBindingDescription> = desc
            .slots
            .iter()
            .map(|slot| {
                vk::VertexInputBindingDescription::default()
                    .binding(slot.slot)
                    .stride(slot.stride)
                    .input_rate(vk::VertexInputRate::VERTEX)
            })
            .collect();

        let attributes: Vec<vk::VertexInputAttributeDescription> = desc
            .elements
            .iter()
            .map(|element| {
                vk::VertexInputAttributeDescription::default()
                    .location(element.shader_location)
                    .binding(element.input_slot)
                    .format(convert_element_type(element.element_type))
                    .offset(element.byte_offset)
            })
            .collect();

        log::trace!(
            "VulkanBackend: input layout for '{}' {} ({} bindings, {} attributes)",
            desc.format_id,
            signature,
            bindings.len(),
            attributes.len()
        );

        Ok(GpuInputLayout::Vulkan {
            bindings,
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutResolver;
    use case_core::vertex::{VertexFormatDescriptor, VertexFormatId, semantics};

    fn limits() -> vk::PhysicalDeviceLimits {
        vk::PhysicalDeviceLimits {
            max_vertex_input_bindings: 16,
            max_vertex_input_attributes: 16,
            max_vertex_input_binding_stride: 2048,
            max_vertex_input_attribute_offset: 2047,
            ..Default::default()
        }
    }

    fn split_format() -> (InputLayoutDesc, ShaderInputSignature) {
        let descriptor = VertexFormatDescriptor::builder(VertexFormatId::custom("split"))
            .attribute_in_slot(semantics::POSITION, ElementType::Float3, 0)
            .attribute_in_slot(semantics::NORMAL, ElementType::Float3, 1)
            .attribute_in_slot(semantics::COLOR, ElementType::Float4, 1)
            .build()
            .unwrap();
        let signature = ShaderInputSignature::new()
            .with_input(semantics::POSITION, ElementType::Float3)
            .with_input(semantics::COLOR, ElementType::Float4);
        let desc = LayoutResolver::describe(&descriptor, &signature).unwrap();
        (desc, signature)
    }

    #[test]
    fn test_vertex_input_descriptions() {
        let (desc, signature) = split_format();
        let layout = VulkanBackend::new(limits())
            .create_input_layout(&desc, &signature)
            .unwrap();

        let GpuInputLayout::Vulkan {
            bindings,
            attributes,
        } = &layout
        else {
            panic!("expected a Vulkan layout, got {layout:?}");
        };

        assert_eq!(bindings.len(), 2);
        assert_eq!((bindings[0].binding, bindings[0].stride), (0, 12));
        assert_eq!((bindings[1].binding, bindings[1].stride), (1, 28));

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[1].location, 1);
        assert_eq!(attributes[1].binding, 1);
        assert_eq!(attributes[1].offset, 12);
        assert_eq!(attributes[1].format, vk::Format::R32G32B32A32_SFLOAT);

        let state = layout.vulkan_vertex_input_state().unwrap();
        assert_eq!(state.vertex_binding_description_count, 2);
        assert_eq!(state.vertex_attribute_description_count, 2);
    }

    #[test]
    fn test_attribute_offset_limit() {
        let (desc, signature) = split_format();
        let backend = VulkanBackend::new(vk::PhysicalDeviceLimits {
            max_vertex_input_attribute_offset: 8,
            ..limits()
        });

        assert_eq!(
            backend.create_input_layout(&desc, &signature).unwrap_err(),
            BackendError::LimitExceeded {
                what: "vertex input attribute offset",
                requested: 12,
                max: 8,
            }
        );
    }
}
