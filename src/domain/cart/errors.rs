//! Cart-specific error types.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | Storage | 503 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Client input could not be coerced into a cart operation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The persisted cart could not be read or written.
    #[error("Cart storage failed: {0}")]
    Storage(String),
}

impl CartError {
    pub fn storage(message: impl Into<String>) -> Self {
        CartError::Storage(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::Validation(_) => ErrorCode::ValidationFailed,
            CartError::Storage(_) => ErrorCode::CartStorageFailed,
        }
    }

    /// Returns true if the caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CartError::Storage(_))
    }
}

impl From<DomainError> for CartError {
    fn from(err: DomainError) -> Self {
        CartError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_validation_code() {
        let err: CartError = ValidationError::empty_field("product_ref").into();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(!err.is_retryable());
    }

    #[test]
    fn domain_error_becomes_retryable_storage_error() {
        let err: CartError = DomainError::new(ErrorCode::CartStorageFailed, "redis down").into();
        assert_eq!(err.code(), ErrorCode::CartStorageFailed);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("redis down"));
    }
}
