//! Fire-and-forget notification dispatch.
//!
//! `notify` returns immediately; delivery runs on a detached tokio task bounded
//! by a timeout. Failures are logged and never reach the registration caller.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::foundation::EventEnvelope;
use crate::domain::registration::RegistrationSucceeded;
use crate::ports::{NotificationError, NotificationMessage, Notifier};

/// Default upper bound on a single delivery.
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// How a dispatched notification ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    Failed(NotificationError),
}

/// Handle to a detached delivery. Dropping it does not cancel delivery.
#[derive(Debug)]
pub struct DispatchHandle {
    task: JoinHandle<DispatchOutcome>,
}

impl DispatchHandle {
    /// Waits for the delivery to finish.
    pub async fn wait(self) -> DispatchOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => DispatchOutcome::Failed(NotificationError::Transport(err.to_string())),
        }
    }
}

/// Sends registration announcements through a [`Notifier`].
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    channel: String,
    timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, channel: impl Into<String>, timeout: Duration) -> Self {
        Self {
            notifier,
            channel: channel.into(),
            timeout,
        }
    }

    /// Spawns delivery of `event` and returns without waiting for it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn notify(&self, event: RegistrationSucceeded) -> DispatchHandle {
        let message = NotificationMessage {
            channel: self.channel.clone(),
            content: format_message(&event),
            event: EventEnvelope::from_event(&event),
        };
        let notifier = Arc::clone(&self.notifier);
        let timeout = self.timeout;
        let registration_id = event.registration_id;

        let task = tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, notifier.send(message)).await {
                Ok(result) => result,
                Err(_) => Err(NotificationError::Timeout(timeout_millis(timeout))),
            };

            match result {
                Ok(()) => {
                    tracing::debug!(
                        registration_id = %registration_id,
                        "Registration notification delivered"
                    );
                    DispatchOutcome::Delivered
                }
                Err(err) => {
                    tracing::warn!(
                        registration_id = %registration_id,
                        code = %err.code(),
                        error = %err,
                        "Registration notification failed"
                    );
                    DispatchOutcome::Failed(err)
                }
            }
        });

        DispatchHandle { task }
    }
}

/// Human-readable announcement for a registration.
pub fn format_message(event: &RegistrationSucceeded) -> String {
    format!(
        "{} registered for {} using {} ({} left)",
        event.user_id, event.tournament_name, event.pass_type_name, event.remaining
    )
}

/// Milliseconds in `timeout`, saturating at `u64::MAX`.
fn timeout_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}
