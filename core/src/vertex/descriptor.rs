//! Attribute and vertex format descriptors.
//!
//! A [`VertexFormatDescriptor`] is an ordered list of [`AttributeDescriptor`]s
//! plus the total stride. Attributes are tightly packed inside each input slot:
//! the first attribute of a slot starts at offset 0 and every following one
//! starts where the previous one ends.
//!
//! # Example
//!
//! ```
//! use case_core::vertex::{ElementType, VertexFormatDescriptor, VertexFormatId, semantics};
//!
//! let descriptor = VertexFormatDescriptor::builder(VertexFormatId::custom("lit"))
//!     .attribute(semantics::POSITION, ElementType::Float3)
//!     .attribute(semantics::NORMAL, ElementType::Float3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(descriptor.stride(), 24);
//! assert_eq!(descriptor.attribute(semantics::NORMAL).unwrap().byte_offset, 12);
//! ```

use std::collections::{BTreeMap, HashSet};

use super::format::{ElementType, VertexFormatId};
use crate::error::{FormatError, Result};

/// A single vertex attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeDescriptor {
    /// Semantic name used to match shader inputs (e.g. `"POSITION"`).
    pub semantic_name: String,
    /// Byte offset within the vertex buffer bound to `input_slot`.
    pub byte_offset: u32,
    /// Data type of this attribute.
    pub element_type: ElementType,
    /// Index of the vertex buffer this attribute reads from.
    pub input_slot: u32,
}

impl AttributeDescriptor {
    /// Create a new attribute descriptor.
    pub fn new(
        semantic_name: impl Into<String>,
        byte_offset: u32,
        element_type: ElementType,
        input_slot: u32,
    ) -> Self {
        Self {
            semantic_name: semantic_name.into(),
            byte_offset,
            element_type,
            input_slot,
        }
    }

    /// First byte after this attribute.
    pub fn end_offset(&self) -> u32 {
        self.byte_offset + self.element_type.size()
    }
}

/// Describes one vertex layout.
///
/// Descriptors are validated on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexFormatDescriptor {
    format_id: VertexFormatId,
    stride: u32,
    attributes: Vec<AttributeDescriptor>,
}

impl VertexFormatDescriptor {
    /// Create a descriptor from an explicit attribute list.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidDescriptor`] if the attributes are not
    /// ordered by `(input_slot, byte_offset)`, are not tightly packed, repeat a
    /// `(semantic_name, input_slot)` pair, or if `stride` differs from the sum
    /// of the attribute sizes.
    pub fn new(
        format_id: VertexFormatId,
        stride: u32,
        attributes: Vec<AttributeDescriptor>,
    ) -> Result<Self> {
        let descriptor = Self {
            format_id,
            stride,
            attributes,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Start building a descriptor with automatically computed offsets.
    pub fn builder(format_id: VertexFormatId) -> VertexFormatBuilder {
        VertexFormatBuilder::new(format_id)
    }

    /// Get the format id.
    pub fn format_id(&self) -> &VertexFormatId {
        &self.format_id
    }

    /// Total size of one vertex across all input slots.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Get the attributes, ordered by `(input_slot, byte_offset)`.
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    /// Get the first attribute with the given semantic.
    pub fn attribute(&self, semantic_name: &str) -> Option<&AttributeDescriptor> {
        self.attributes
            .iter()
            .find(|attr| attr.semantic_name == semantic_name)
    }

    /// Check if this format has an attribute with the given semantic.
    pub fn has_semantic(&self, semantic_name: &str) -> bool {
        self.attribute(semantic_name).is_some()
    }

    /// Get all attributes reading from the given input slot.
    pub fn attributes_in_slot(
        &self,
        input_slot: u32,
    ) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes
            .iter()
            .filter(move |attr| attr.input_slot == input_slot)
    }

    /// Buffer stride of a single input slot (0 for slots without attributes).
    pub fn slot_stride(&self, input_slot: u32) -> u32 {
        self.attributes_in_slot(input_slot)
            .map(|attr| attr.element_type.size())
            .sum()
    }

    /// Number of input slots, counting unused slots below the highest one.
    pub fn slot_count(&self) -> u32 {
        self.attributes
            .iter()
            .map(|attr| attr.input_slot + 1)
            .max()
            .unwrap_or(0)
    }

    /// Check the layout invariants.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| FormatError::InvalidDescriptor {
            format_id: self.format_id.clone(),
            reason,
        };

        if self.attributes.is_empty() {
            return Err(invalid("format has no attributes".to_string()));
        }

        let mut seen = HashSet::new();
        let mut previous: Option<&AttributeDescriptor> = None;
        for attr in &self.attributes {
            if !seen.insert((attr.semantic_name.as_str(), attr.input_slot)) {
                return Err(invalid(format!(
                    "semantic {} appears twice in slot {}",
                    attr.semantic_name, attr.input_slot
                )));
            }

            let expected_offset = match previous {
                Some(prev) if prev.input_slot == attr.input_slot => prev.end_offset(),
                Some(prev) if prev.input_slot > attr.input_slot => {
                    return Err(invalid(format!(
                        "attribute {} in slot {} follows slot {}",
                        attr.semantic_name, attr.input_slot, prev.input_slot
                    )));
                }
                _ => 0,
            };
            if attr.byte_offset != expected_offset {
                return Err(invalid(format!(
                    "attribute {} at offset {} in slot {}, expected offset {}",
                    attr.semantic_name, attr.byte_offset, attr.input_slot, expected_offset
                )));
            }

            previous = Some(attr);
        }

        let expected_stride: u32 = self
            .attributes
            .iter()
            .map(|attr| attr.element_type.size())
            .sum();
        if self.stride != expected_stride {
            return Err(invalid(format!(
                "stride {} does not match attribute sizes ({})",
                self.stride, expected_stride
            )));
        }

        Ok(())
    }
}

/// Builds a [`VertexFormatDescriptor`], assigning offsets in declaration order.
#[derive(Debug, Clone)]
pub struct VertexFormatBuilder {
    format_id: VertexFormatId,
    attributes: Vec<AttributeDescriptor>,
    next_offsets: BTreeMap<u32, u32>,
}

impl VertexFormatBuilder {
    /// Create an empty builder.
    pub fn new(format_id: VertexFormatId) -> Self {
        Self {
            format_id,
            attributes: Vec::new(),
            next_offsets: BTreeMap::new(),
        }
    }

    /// Append an attribute to input slot 0.
    pub fn attribute(self, semantic_name: impl Into<String>, element_type: ElementType) -> Self {
        self.attribute_in_slot(semantic_name, element_type, 0)
    }

    /// Append an attribute to the given input slot.
    pub fn attribute_in_slot(
        mut self,
        semantic_name: impl Into<String>,
        element_type: ElementType,
        input_slot: u32,
    ) -> Self {
        let offset = self.next_offsets.entry(input_slot).or_insert(0);
        self.attributes.push(AttributeDescriptor::new(
            semantic_name,
            *offset,
            element_type,
            input_slot,
        ));
        *offset += element_type.size();
        self
    }

    /// Finish the descriptor.
    ///
    /// Attributes are grouped by input slot, keeping declaration order inside
    /// each slot.
    pub fn build(mut self) -> Result<VertexFormatDescriptor> {
        self.attributes.sort_by_key(|attr| (attr.input_slot, attr.byte_offset));
        let stride = self.next_offsets.values().sum();
        VertexFormatDescriptor::new(self.format_id, stride, self.attributes)
    }
}
