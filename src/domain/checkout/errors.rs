//! Checkout error types.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | InvalidWebhookSignature | 401 |
//! | SessionCreationFailed | 502 |
//! | CartStorage | 503 |

use thiserror::Error;

use crate::domain::cart::CartError;
use crate::domain::foundation::{ErrorCode, ValidationError};

/// Errors raised while turning a cart into a payment session, or while
/// confirming one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The payment provider refused or failed to create the session.
    #[error("Checkout session creation failed: {message}")]
    SessionCreationFailed { message: String, retryable: bool },

    /// A payment webhook failed signature or timestamp verification.
    #[error("Invalid webhook signature")]
    InvalidWebhookSignature,

    /// The persisted cart could not be loaded or cleared.
    #[error("Cart storage failed: {0}")]
    CartStorage(String),
}

impl CheckoutError {
    pub fn session_creation_failed(message: impl Into<String>, retryable: bool) -> Self {
        CheckoutError::SessionCreationFailed {
            message: message.into(),
            retryable,
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::Validation(_) => ErrorCode::ValidationFailed,
            CheckoutError::SessionCreationFailed { .. } => ErrorCode::SessionCreationFailed,
            CheckoutError::InvalidWebhookSignature => ErrorCode::InvalidWebhookSignature,
            CheckoutError::CartStorage(_) => ErrorCode::CartStorageFailed,
        }
    }

    /// Returns true if the caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::SessionCreationFailed { retryable, .. } => *retryable,
            CheckoutError::CartStorage(_) => true,
            _ => false,
        }
    }
}

impl From<CartError> for CheckoutError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Validation(v) => CheckoutError::Validation(v),
            CartError::Storage(msg) => CheckoutError::CartStorage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_creation_failure_carries_retry_flag() {
        let transient = CheckoutError::session_creation_failed("rate limited", true);
        let permanent = CheckoutError::session_creation_failed("invalid price", false);

        assert!(transient.is_retryable());
        assert!(!permanent.is_retryable());
        assert_eq!(permanent.code(), ErrorCode::SessionCreationFailed);
        assert_eq!(
            permanent.to_string(),
            "Checkout session creation failed: invalid price"
        );
    }

    #[test]
    fn cart_storage_error_converts() {
        let err: CheckoutError = CartError::storage("timeout").into();
        assert_eq!(err.code(), ErrorCode::CartStorageFailed);
        assert!(err.is_retryable());
    }

    #[test]
    fn invalid_signature_is_not_retryable() {
        assert!(!CheckoutError::InvalidWebhookSignature.is_retryable());
        assert_eq!(
            CheckoutError::InvalidWebhookSignature.code(),
            ErrorCode::InvalidWebhookSignature
        );
    }
}
