//! Registration domain module.
//!
//! Tournaments, passes and the registration record, plus the phase
//! machine a single registration attempt moves through.
//!
//! # Module Structure
//!
//! - `pass` - Pass, PassType and the PassView lookup shape
//! - `tournament` - Tournament reference data
//! - `registration` - Registration record
//! - `phase` - RegistrationPhase state machine
//! - `events` - RegistrationSucceeded
//! - `errors` - RegistrationError

mod errors;
mod events;
mod pass;
mod phase;
mod registration;
mod tournament;

pub use errors::RegistrationError;
pub use events::RegistrationSucceeded;
pub use pass::{Pass, PassType, PassView};
pub use phase::{RegistrationPhase, RejectionReason};
pub use registration::Registration;
pub use tournament::Tournament;
