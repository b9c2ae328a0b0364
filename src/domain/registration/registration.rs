//! Registration record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PassId, RegistrationId, Timestamp, TournamentId, UserId};

/// A participant's entry into a tournament, paid for with one pass unit.
///
/// Created only by the store's consume-and-register operation, together
/// with exactly one decrement of the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub user_id: UserId,
    pub tournament_id: TournamentId,
    pub pass_id: PassId,
    pub created_at: Timestamp,
}

impl Registration {
    pub fn new(user_id: UserId, tournament_id: TournamentId, pass_id: PassId) -> Self {
        Self {
            id: RegistrationId::new(),
            user_id,
            tournament_id,
            pass_id,
            created_at: Timestamp::now(),
        }
    }
}
