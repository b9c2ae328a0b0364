//! RegisterForEventHandler - Spends one pass unit on a tournament entry.
//!
//! Lookups reject early with a precise error, but the authoritative check
//! is the store's atomic consume: a pass that looked eligible can still
//! lose a race, which is reported the same way as an exhausted pass.
//! Notification is dispatched only after commit and never awaited.

use std::sync::Arc;

use crate::application::notification_dispatcher::NotificationDispatcher;
use crate::domain::foundation::{PassId, StateMachine, TournamentId, UserId};
use crate::domain::registration::{
    Registration, RegistrationError, RegistrationPhase, RegistrationSucceeded,
};
use crate::ports::{ConsumeOutcome, ConsumePass, RegistrationStore};

/// Command to register a user for a tournament with one of their passes.
#[derive(Debug, Clone)]
pub struct RegisterForEventCommand {
    pub user_id: UserId,
    pub tournament_id: TournamentId,
    pub pass_id: PassId,
}

/// Result of a committed registration.
#[derive(Debug, Clone)]
pub struct RegisterForEventResult {
    pub registration: Registration,
    pub tournament_name: String,
    pub pass_type_name: String,
    /// Units left on the pass after this registration.
    pub remaining: u32,
    pub phase: RegistrationPhase,
}

pub struct RegisterForEventHandler {
    store: Arc<dyn RegistrationStore>,
    dispatcher: NotificationDispatcher,
}

impl RegisterForEventHandler {
    pub fn new(store: Arc<dyn RegistrationStore>, dispatcher: NotificationDispatcher) -> Self {
        Self { store, dispatcher }
    }

    pub async fn handle(
        &self,
        cmd: RegisterForEventCommand,
    ) -> Result<RegisterForEventResult, RegistrationError> {
        let mut attempt = Attempt::start(&cmd);

        // 1. Tournament must exist
        let tournament = match self.store.find_tournament(&cmd.tournament_id).await {
            Ok(Some(tournament)) => tournament,
            Ok(None) => {
                return Err(attempt.reject(RegistrationError::EventNotFound(cmd.tournament_id)))
            }
            Err(err) => return Err(attempt.reject(err.into())),
        };

        // 2. Pass must belong to the user and have units left
        let view = match self.store.find_pass(&cmd.pass_id).await {
            Ok(Some(view)) if view.pass.is_eligible_for(&cmd.user_id) => view,
            Ok(_) => {
                return Err(attempt.reject(RegistrationError::PassExhaustedOrInvalid(cmd.pass_id)))
            }
            Err(err) => return Err(attempt.reject(err.into())),
        };
        attempt.advance(RegistrationPhase::Validated);

        // 3. Atomic decrement + insert
        let consumed = self
            .store
            .consume_pass_and_register(ConsumePass {
                user_id: cmd.user_id.clone(),
                tournament_id: cmd.tournament_id,
                pass_id: cmd.pass_id,
            })
            .await;

        let (registration, remaining) = match consumed {
            Ok(ConsumeOutcome::Registered {
                registration,
                remaining,
            }) => (registration, remaining),
            Ok(ConsumeOutcome::Exhausted) => {
                return Err(attempt.reject(RegistrationError::PassExhaustedOrInvalid(cmd.pass_id)))
            }
            Err(err) => {
                return Err(attempt.reject(RegistrationError::commit_failed(err.to_string())))
            }
        };
        attempt.advance(RegistrationPhase::Committed);

        tracing::info!(
            registration_id = %registration.id,
            user_id = %cmd.user_id,
            tournament_id = %cmd.tournament_id,
            pass_id = %cmd.pass_id,
            remaining,
            "Registration committed"
        );

        // 4. Best-effort notification
        let event = RegistrationSucceeded::new(
            &registration,
            tournament.name.clone(),
            view.pass_type.name.clone(),
            remaining,
        );
        drop(self.dispatcher.notify(event));
        attempt.advance(RegistrationPhase::NotifyAttempted);

        Ok(RegisterForEventResult {
            registration,
            tournament_name: tournament.name,
            pass_type_name: view.pass_type.name,
            remaining,
            phase: attempt.phase,
        })
    }
}

/// Phase bookkeeping for one attempt.
struct Attempt {
    phase: RegistrationPhase,
    user_id: UserId,
    tournament_id: TournamentId,
    pass_id: PassId,
}

impl Attempt {
    fn start(cmd: &RegisterForEventCommand) -> Self {
        tracing::debug!(
            user_id = %cmd.user_id,
            tournament_id = %cmd.tournament_id,
            pass_id = %cmd.pass_id,
            "Registration started"
        );
        Self {
            phase: RegistrationPhase::Started,
            user_id: cmd.user_id.clone(),
            tournament_id: cmd.tournament_id,
            pass_id: cmd.pass_id,
        }
    }

    fn advance(&mut self, next: RegistrationPhase) {
        match self.phase.transition_to(next) {
            Ok(phase) => {
                tracing::debug!(
                    from = ?self.phase,
                    to = ?phase,
                    pass_id = %self.pass_id,
                    "Registration phase changed"
                );
                self.phase = phase;
            }
            Err(err) => {
                tracing::error!(
                    from = ?self.phase,
                    to = ?next,
                    error = %err,
                    "Illegal registration phase change"
                );
            }
        }
    }

    fn reject(&mut self, err: RegistrationError) -> RegistrationError {
        let reason = err.rejection_reason();
        self.advance(RegistrationPhase::Rejected(reason));
        tracing::info!(
            user_id = %self.user_id,
            tournament_id = %self.tournament_id,
            pass_id = %self.pass_id,
            reason = %reason,
            error = %err,
            "Registration rejected"
        );
        err
    }
}
