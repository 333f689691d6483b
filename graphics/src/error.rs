//! Layout resolution error types.

use case_core::FormatError;
use case_core::vertex::VertexFormatId;
use thiserror::Error;

use crate::backend::BackendError;
use crate::layout::MismatchError;

/// Errors returned by the format registry and the layout resolver.
///
/// None of these are fatal to the process; the caller decides whether to fall
/// back to another shader or format, skip the draw, or abort the frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The requested format is not registered.
    #[error("unknown vertex format '{0}'")]
    UnknownFormat(VertexFormatId),

    /// A format with the same id is already registered.
    #[error("vertex format '{0}' is already registered")]
    DuplicateFormat(VertexFormatId),

    /// A descriptor breaks the layout invariants.
    #[error("invalid vertex format '{format_id}': {reason}")]
    InvalidDescriptor {
        format_id: VertexFormatId,
        reason: String,
    },

    /// The format does not provide what the shader expects.
    #[error(transparent)]
    Mismatch(#[from] MismatchError),

    /// The backend failed to create the input layout.
    #[error("failed to create input layout for '{format_id}': {source}")]
    DeviceResource {
        format_id: VertexFormatId,
        #[source]
        source: BackendError,
    },

    /// A shader input signature could not be reflected from shader source.
    #[error("shader input reflection failed: {0}")]
    SignatureReflection(String),
}

impl From<FormatError> for LayoutError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::UnknownFormat(id) => Self::UnknownFormat(id),
            FormatError::DuplicateFormat(id) => Self::DuplicateFormat(id),
            FormatError::InvalidDescriptor { format_id, reason } => {
                Self::InvalidDescriptor { format_id, reason }
            }
        }
    }
}

/// A specialized Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LayoutError::UnknownFormat(VertexFormatId::Complete);
        assert_eq!(err.to_string(), "unknown vertex format 'Complete'");

        let err = LayoutError::DeviceResource {
            format_id: VertexFormatId::Simple,
            source: BackendError::DeviceLost,
        };
        assert_eq!(
            err.to_string(),
            "failed to create input layout for 'Simple': GPU device lost"
        );
    }

    #[test]
    fn test_from_format_error() {
        let err: LayoutError = FormatError::DuplicateFormat(VertexFormatId::Normal).into();
        assert_eq!(err, LayoutError::DuplicateFormat(VertexFormatId::Normal));
    }
}
