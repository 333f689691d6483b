//! Element types, semantic names and format identifiers.

use std::fmt;
use std::sync::Arc;

/// Well-known semantic names.
///
/// Semantic names are plain, case-sensitive strings; these are the ones used by
/// the built-in formats. Custom formats may use any name.
pub mod semantics {
    /// Vertex position.
    pub const POSITION: &str = "POSITION";
    /// Vertex normal.
    pub const NORMAL: &str = "NORMAL";
    /// Texture coordinates.
    pub const TEXCOORD: &str = "TEXCOORD";
    /// Vertex color.
    pub const COLOR: &str = "COLOR";
    /// Tangent vector.
    pub const TANGENT: &str = "TANGENT";
    /// Bitangent vector.
    pub const BITANGENT: &str = "BITANGENT";
}

/// Data type of a single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    /// Single 32-bit float.
    Float1,
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
}

impl ElementType {
    /// Get the size in bytes of this element type.
    pub fn size(&self) -> u32 {
        self.components() * 4
    }

    /// Number of float components.
    pub fn components(&self) -> u32 {
        match self {
            Self::Float1 => 1,
            Self::Float2 => 2,
            Self::Float3 => 3,
            Self::Float4 => 4,
        }
    }

    /// Element type with the given number of float components.
    pub fn from_components(components: u32) -> Option<Self> {
        match components {
            1 => Some(Self::Float1),
            2 => Some(Self::Float2),
            3 => Some(Self::Float3),
            4 => Some(Self::Float4),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Float1 => "Float1",
            Self::Float2 => "Float2",
            Self::Float3 => "Float3",
            Self::Float4 => "Float4",
        };
        f.write_str(name)
    }
}

/// Identifies a vertex format.
///
/// The seven built-in formats have dedicated variants; formats registered at
/// runtime use [`VertexFormatId::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexFormatId {
    /// Position only.
    Simple,
    /// Position + texture coordinates.
    Textured,
    /// Position + texture coordinates + normal.
    TexturedNormal,
    /// Position + color.
    Colored,
    /// Position + color + normal.
    ColoredNormal,
    /// Position + normal.
    Normal,
    /// Position + texture coordinates + normal + tangent + bitangent.
    Complete,
    /// A format registered at runtime.
    Custom(Arc<str>),
}

impl VertexFormatId {
    /// All built-in formats, in catalog order.
    pub const BUILTIN: [VertexFormatId; 7] = [
        Self::Simple,
        Self::Textured,
        Self::TexturedNormal,
        Self::Colored,
        Self::ColoredNormal,
        Self::Normal,
        Self::Complete,
    ];

    /// Create a format id from a name.
    ///
    /// Names of built-in formats map to their variants, so `custom("Simple")`
    /// is [`VertexFormatId::Simple`].
    pub fn custom(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        Self::BUILTIN
            .into_iter()
            .find(|builtin| builtin.name() == &*name)
            .unwrap_or(Self::Custom(name))
    }

    /// Get the format name.
    pub fn name(&self) -> &str {
        match self {
            Self::Simple => "Simple",
            Self::Textured => "Textured",
            Self::TexturedNormal => "TexturedNormal",
            Self::Colored => "Colored",
            Self::ColoredNormal => "ColoredNormal",
            Self::Normal => "Normal",
            Self::Complete => "Complete",
            Self::Custom(name) => name,
        }
    }

    /// Check if this is one of the built-in formats.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for VertexFormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
