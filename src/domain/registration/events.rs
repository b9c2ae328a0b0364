//! Registration domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventId, PassId, RegistrationId, Timestamp, TournamentId, UserId,
};

use super::Registration;

/// A participant was registered and a pass unit spent.
///
/// Emitted strictly after commit; consumed by the notification dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSucceeded {
    pub event_id: EventId,
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub tournament_id: TournamentId,
    pub tournament_name: String,
    pub pass_id: PassId,
    pub pass_type_name: String,
    pub remaining: u32,
    pub occurred_at: Timestamp,
}

impl RegistrationSucceeded {
    pub fn new(
        registration: &Registration,
        tournament_name: impl Into<String>,
        pass_type_name: impl Into<String>,
        remaining: u32,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            registration_id: registration.id,
            user_id: registration.user_id.clone(),
            tournament_id: registration.tournament_id,
            tournament_name: tournament_name.into(),
            pass_id: registration.pass_id,
            pass_type_name: pass_type_name.into(),
            remaining,
            occurred_at: registration.created_at,
        }
    }
}

domain_event!(
    RegistrationSucceeded,
    event_type = "registration.succeeded.v1",
    aggregate_id = registration_id,
    aggregate_type = "Registration",
    occurred_at = occurred_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, EventEnvelope};

    #[test]
    fn event_wraps_registration() {
        let registration = Registration::new(
            UserId::new("player-9").unwrap(),
            TournamentId::new(),
            PassId::new(),
        );

        let event = RegistrationSucceeded::new(&registration, "Spring Open", "10-Entry Pass", 2);
        let envelope = EventEnvelope::from_event(&event);

        assert_eq!(event.aggregate_id(), registration.id.to_string());
        assert_eq!(envelope.event_type, "registration.succeeded.v1");
        assert_eq!(envelope.aggregate_type, "Registration");
        assert_eq!(envelope.payload["tournament_name"], "Spring Open");
        assert_eq!(envelope.payload["remaining"], 2);
    }
}
