//! Backend error types.

use thiserror::Error;

/// Errors that can occur in backend operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Failed to create a resource.
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A device limit would be exceeded.
    #[error("{what} exceeds device limit: requested {requested}, maximum {max}")]
    LimitExceeded {
        what: &'static str,
        requested: u64,
        max: u64,
    },

    /// The device was lost.
    #[error("GPU device lost")]
    DeviceLost,

    /// Internal backend error.
    #[error("internal backend error: {0}")]
    Internal(String),
}

impl BackendError {
    /// Fail with [`BackendError::LimitExceeded`] if `requested > max`.
    pub(crate) fn check_limit(what: &'static str, requested: u64, max: u64) -> Result<(), Self> {
        if requested > max {
            return Err(Self::LimitExceeded {
                what,
                requested,
                max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_limit() {
        assert!(BackendError::check_limit("vertex buffers", 8, 8).is_ok());
        let err = BackendError::check_limit("vertex buffers", 9, 8).unwrap_err();
        assert_eq!(
            err.to_string(),
            "vertex buffers exceeds device limit: requested 9, maximum 8"
        );
    }
}
