//! HTTP error mapping.
//!
//! | Code | Status |
//! |------|--------|
//! | VALIDATION_FAILED | 400 |
//! | AUTHENTICATION_REQUIRED, INVALID_WEBHOOK_SIGNATURE | 401 |
//! | EVENT_NOT_FOUND | 404 |
//! | PASS_EXHAUSTED_OR_INVALID | 409 |
//! | SESSION_CREATION_FAILED | 502 |
//! | TRANSACTION_COMMIT_FAILED, CART_STORAGE_FAILED | 503 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartError;
use crate::domain::checkout::CheckoutError;
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::registration::RegistrationError;

/// Standard error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Whether repeating the same request may succeed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retryable: false,
        }
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

/// API error type that converts module errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    AuthenticationRequired,
    Validation(ValidationError),
    Cart(CartError),
    Checkout(CheckoutError),
    Registration(RegistrationError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        Self::Cart(err)
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        Self::Checkout(err)
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        Self::Registration(err)
    }
}

/// Status code for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidWebhookSignature => StatusCode::UNAUTHORIZED,
        ErrorCode::EventNotFound => StatusCode::NOT_FOUND,
        ErrorCode::PassExhaustedOrInvalid => StatusCode::CONFLICT,
        ErrorCode::SessionCreationFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::TransactionCommitFailed
        | ErrorCode::CartStorageFailed
        | ErrorCode::DatabaseError => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::NotificationDeliveryFailed | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message, retryable) = match &self {
            ApiError::AuthenticationRequired => {
                let body =
                    ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
                return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
            }
            ApiError::Validation(err) => (ErrorCode::ValidationFailed, err.to_string(), false),
            ApiError::Cart(err) => (err.code(), err.to_string(), err.is_retryable()),
            ApiError::Checkout(err) => (err.code(), err.to_string(), err.is_retryable()),
            ApiError::Registration(err) => (err.code(), err.to_string(), err.is_retryable()),
        };

        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(code = %code, error = %message, "Request failed");
        }

        let body = ErrorResponse::new(code.to_string(), message).retryable(retryable);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PassId, TournamentId};

    #[test]
    fn status_mapping_follows_error_kind() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::EventNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::PassExhaustedOrInvalid), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::SessionCreationFailed), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(ErrorCode::TransactionCommitFailed),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(ErrorCode::InvalidWebhookSignature),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn registration_errors_map_to_expected_statuses() {
        let not_found = ApiError::from(RegistrationError::EventNotFound(TournamentId::new()));
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let exhausted = ApiError::from(RegistrationError::PassExhaustedOrInvalid(PassId::new()));
        assert_eq!(exhausted.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn error_response_omits_retryable_when_false() {
        let json = serde_json::to_string(&ErrorResponse::new("EVENT_NOT_FOUND", "nope")).unwrap();
        assert!(!json.contains("retryable"));

        let json =
            serde_json::to_string(&ErrorResponse::new("X", "y").retryable(true)).unwrap();
        assert!(json.contains("\"retryable\":true"));
    }
}
