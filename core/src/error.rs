//! Vertex format error types.

use thiserror::Error;

use crate::vertex::VertexFormatId;

/// Errors raised while looking up or registering vertex formats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The requested format is not in the catalog.
    #[error("unknown vertex format '{0}'")]
    UnknownFormat(VertexFormatId),

    /// A format with the same id is already registered.
    #[error("vertex format '{0}' is already registered")]
    DuplicateFormat(VertexFormatId),

    /// The descriptor breaks one of the layout invariants.
    #[error("invalid vertex format '{format_id}': {reason}")]
    InvalidDescriptor {
        format_id: VertexFormatId,
        reason: String,
    },
}

/// A specialized Result type for vertex format operations.
pub type Result<T> = std::result::Result<T, FormatError>;
