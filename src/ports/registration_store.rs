//! Registration store port.
//!
//! Owns tournaments, passes and registrations. The one mutating operation,
//! [`RegistrationStore::consume_pass_and_register`], is the system's only
//! path to spending a pass unit and must be atomic across processes.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PassId, TournamentId, UserId};
use crate::domain::registration::{PassView, Registration, Tournament};

/// Request to spend one unit of a pass on a tournament entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumePass {
    pub user_id: UserId,
    pub tournament_id: TournamentId,
    pub pass_id: PassId,
}

/// Result of the atomic consume-and-register primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// The pass was decremented and the registration inserted together.
    Registered {
        registration: Registration,
        remaining: u32,
    },

    /// The guard `remaining >= 1 AND owner = user` did not hold at commit
    /// time. Nothing was written.
    Exhausted,
}

/// Port for tournament, pass and registration persistence.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Finds a tournament by ID.
    async fn find_tournament(&self, id: &TournamentId) -> Result<Option<Tournament>, DomainError>;

    /// Finds a pass together with its pass type.
    async fn find_pass(&self, id: &PassId) -> Result<Option<PassView>, DomainError>;

    /// Atomically decrements the pass and inserts the registration.
    ///
    /// Implementations must re-check ownership and `remaining >= 1` inside
    /// the same atomic unit as the decrement, never in a separate read.
    /// Either both writes become visible or neither does.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` when the store itself fails; a failed guard is
    /// reported as `Ok(ConsumeOutcome::Exhausted)`.
    async fn consume_pass_and_register(
        &self,
        request: ConsumePass,
    ) -> Result<ConsumeOutcome, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn RegistrationStore) {}
    }
}
