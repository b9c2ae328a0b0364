//! Registration error types.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | EventNotFound | 404 |
//! | PassExhaustedOrInvalid | 409 |
//! | TransactionCommitFailed | 503 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, PassId, TournamentId, ValidationError};

use super::RejectionReason;

/// Errors raised by a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Tournament not found: {0}")]
    EventNotFound(TournamentId),

    /// The pass does not exist, belongs to someone else, or has no units
    /// left. Deliberately indistinguishable to the caller.
    #[error("Pass {0} is exhausted or not valid for this user")]
    PassExhaustedOrInvalid(PassId),

    #[error("Registration could not be committed: {0}")]
    TransactionCommitFailed(String),
}

impl RegistrationError {
    pub fn commit_failed(cause: impl Into<String>) -> Self {
        RegistrationError::TransactionCommitFailed(cause.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistrationError::Validation(_) => ErrorCode::ValidationFailed,
            RegistrationError::EventNotFound(_) => ErrorCode::EventNotFound,
            RegistrationError::PassExhaustedOrInvalid(_) => ErrorCode::PassExhaustedOrInvalid,
            RegistrationError::TransactionCommitFailed(_) => ErrorCode::TransactionCommitFailed,
        }
    }

    /// Only store failures are worth retrying; no state changed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RegistrationError::TransactionCommitFailed(_))
    }

    /// Phase-level reason recorded when the attempt is rejected.
    pub fn rejection_reason(&self) -> RejectionReason {
        match self {
            RegistrationError::EventNotFound(_) => RejectionReason::EventNotFound,
            RegistrationError::Validation(_) | RegistrationError::PassExhaustedOrInvalid(_) => {
                RejectionReason::PassExhaustedOrInvalid
            }
            RegistrationError::TransactionCommitFailed(_) => RejectionReason::StoreFailure,
        }
    }
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        RegistrationError::TransactionCommitFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        let pass_id = PassId::new();
        assert_eq!(
            RegistrationError::EventNotFound(TournamentId::new()).code(),
            ErrorCode::EventNotFound
        );
        assert_eq!(
            RegistrationError::PassExhaustedOrInvalid(pass_id).code(),
            ErrorCode::PassExhaustedOrInvalid
        );
        assert_eq!(
            RegistrationError::commit_failed("deadlock").code(),
            ErrorCode::TransactionCommitFailed
        );
    }

    #[test]
    fn only_commit_failures_are_retryable() {
        assert!(RegistrationError::commit_failed("pool timeout").is_retryable());
        assert!(!RegistrationError::EventNotFound(TournamentId::new()).is_retryable());
        assert!(!RegistrationError::PassExhaustedOrInvalid(PassId::new()).is_retryable());
    }

    #[test]
    fn store_error_keeps_cause() {
        let err: RegistrationError = DomainError::database("connection reset").into();
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(err.rejection_reason(), RejectionReason::StoreFailure);
    }
}
