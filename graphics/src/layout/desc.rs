//! Backend-neutral input layout description.

use case_core::vertex::{ElementType, VertexFormatId};

/// One attribute fed to the shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElement {
    pub semantic_name: String,
    /// Shader location, equal to the index of the matching signature entry.
    pub shader_location: u32,
    pub element_type: ElementType,
    pub byte_offset: u32,
    pub input_slot: u32,
}

/// One vertex buffer binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSlot {
    pub slot: u32,
    /// Bytes between consecutive vertices in this buffer.
    pub stride: u32,
}

/// Everything a backend needs to create an input layout.
///
/// `elements` is in shader location order. `slots` covers every slot from 0 to
/// the highest slot of the format, including slots the shader does not read,
/// so vertex buffers can be bound by slot index unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayoutDesc {
    pub format_id: VertexFormatId,
    pub elements: Vec<InputElement>,
    pub slots: Vec<InputSlot>,
}

impl InputLayoutDesc {
    /// Elements read from the given slot.
    pub fn elements_in_slot(&self, slot: u32) -> impl Iterator<Item = &InputElement> {
        self.elements.iter().filter(move |e| e.input_slot == slot)
    }

    /// Largest attribute byte offset within any slot.
    pub fn max_attribute_offset(&self) -> u32 {
        self.elements
            .iter()
            .map(|e| e.byte_offset)
            .max()
            .unwrap_or(0)
    }

    /// Largest slot stride.
    pub fn max_stride(&self) -> u32 {
        self.slots.iter().map(|s| s.stride).max().unwrap_or(0)
    }
}
