//! Vertex format catalog.
//!
//! The catalog is a data-driven table mapping [`VertexFormatId`] to its
//! [`VertexFormatDescriptor`]. It starts out with the seven built-in formats
//! and can be extended at runtime with custom formats.
//!
//! | Format | Attributes | Stride |
//! |--------|------------|--------|
//! | `Simple` | POSITION | 12 |
//! | `Textured` | POSITION, TEXCOORD | 20 |
//! | `TexturedNormal` | POSITION, TEXCOORD, NORMAL | 32 |
//! | `Colored` | POSITION, COLOR | 28 |
//! | `ColoredNormal` | POSITION, COLOR, NORMAL | 40 |
//! | `Normal` | POSITION, NORMAL | 24 |
//! | `Complete` | POSITION, TEXCOORD, NORMAL, TANGENT, BITANGENT | 56 |

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use super::descriptor::VertexFormatDescriptor;
use super::format::{ElementType, VertexFormatId};
use super::semantics::{BITANGENT, COLOR, NORMAL, POSITION, TANGENT, TEXCOORD};
use crate::error::{FormatError, Result};

static BUILTIN_CATALOG: LazyLock<VertexFormatCatalog> = LazyLock::new(|| {
    let mut catalog = VertexFormatCatalog::empty();
    for id in VertexFormatId::BUILTIN {
        if let Some(descriptor) = builtin_descriptor(&id) {
            catalog.formats.insert(id, Arc::new(descriptor));
        }
    }
    log::debug!("Built-in vertex catalog ready ({} formats)", catalog.len());
    catalog
});

/// Get the descriptor of a built-in format.
///
/// Returns `None` for [`VertexFormatId::Custom`] ids.
pub fn builtin_descriptor(id: &VertexFormatId) -> Option<VertexFormatDescriptor> {
    use ElementType::{Float2, Float3, Float4};

    let builder = VertexFormatDescriptor::builder(id.clone()).attribute(POSITION, Float3);
    let builder = match id {
        VertexFormatId::Simple => builder,
        VertexFormatId::Textured => builder.attribute(TEXCOORD, Float2),
        VertexFormatId::TexturedNormal => builder
            .attribute(TEXCOORD, Float2)
            .attribute(NORMAL, Float3),
        VertexFormatId::Colored => builder.attribute(COLOR, Float4),
        VertexFormatId::ColoredNormal => builder
            .attribute(COLOR, Float4)
            .attribute(NORMAL, Float3),
        VertexFormatId::Normal => builder.attribute(NORMAL, Float3),
        VertexFormatId::Complete => builder
            .attribute(TEXCOORD, Float2)
            .attribute(NORMAL, Float3)
            .attribute(TANGENT, Float3)
            .attribute(BITANGENT, Float3),
        VertexFormatId::Custom(_) => return None,
    };
    Some(
        builder
            .build()
            .expect("built-in vertex format table is well-formed"),
    )
}

/// Table of known vertex formats.
#[derive(Debug, Clone, Default)]
pub struct VertexFormatCatalog {
    formats: BTreeMap<VertexFormatId, Arc<VertexFormatDescriptor>>,
}

impl VertexFormatCatalog {
    /// Create a catalog holding the built-in formats.
    ///
    /// Descriptors are shared with the process-wide built-in table.
    pub fn builtin() -> Self {
        Self::shared_builtin().clone()
    }

    /// The process-wide, read-only built-in catalog.
    pub fn shared_builtin() -> &'static VertexFormatCatalog {
        &BUILTIN_CATALOG
    }

    /// Create an empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the descriptor for a format.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnknownFormat`] if the format is not in the catalog.
    pub fn get(&self, id: &VertexFormatId) -> Result<Arc<VertexFormatDescriptor>> {
        self.formats
            .get(id)
            .cloned()
            .ok_or_else(|| FormatError::UnknownFormat(id.clone()))
    }

    /// Check if a format is in the catalog.
    pub fn contains(&self, id: &VertexFormatId) -> bool {
        self.formats.contains_key(id)
    }

    /// Add a new format.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::DuplicateFormat`] if a format with the same id is
    /// already present, or [`FormatError::InvalidDescriptor`] if the descriptor
    /// is malformed.
    pub fn insert(&mut self, descriptor: VertexFormatDescriptor) -> Result<()> {
        descriptor.validate()?;
        let id = descriptor.format_id().clone();
        // A raw `Custom` variant may still spell a built-in name.
        if self.formats.keys().any(|existing| existing.name() == id.name()) {
            return Err(FormatError::DuplicateFormat(id));
        }
        self.formats.insert(id, Arc::new(descriptor));
        Ok(())
    }

    /// Replace the descriptor of an existing format, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnknownFormat`] if the format is not present.
    pub fn replace(
        &mut self,
        descriptor: VertexFormatDescriptor,
    ) -> Result<Arc<VertexFormatDescriptor>> {
        descriptor.validate()?;
        let id = descriptor.format_id().clone();
        match self.formats.get_mut(&id) {
            Some(slot) => Ok(std::mem::replace(slot, Arc::new(descriptor))),
            None => Err(FormatError::UnknownFormat(id)),
        }
    }

    /// Get all format ids in catalog order (built-ins first).
    pub fn ids(&self) -> impl Iterator<Item = &VertexFormatId> {
        self.formats.keys()
    }

    /// Iterate over all descriptors.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<VertexFormatDescriptor>> {
        self.formats.values()
    }

    /// Number of formats in the catalog.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
