//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, event plumbing and error types
//! that form the vocabulary of the courtpass domain.

mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId};
pub use ids::{CartSessionId, PassId, PassTypeId, ProductRef, RegistrationId, TournamentId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
