//! Notifier port for best-effort chat notifications.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{ErrorCode, EventEnvelope};

/// Message handed to a notification channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Destination channel name (e.g. `#registrations`).
    pub channel: String,

    /// Human-readable text.
    pub content: String,

    /// The event being announced.
    pub event: EventEnvelope,
}

/// Delivery failure. Logged by the dispatcher, never surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notification transport failed: {0}")]
    Transport(String),

    #[error("Notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Notification timed out after {0}ms")]
    Timeout(u64),
}

impl NotificationError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::NotificationDeliveryFailed
    }
}

/// Port for sending notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: NotificationMessage) -> Result<(), NotificationError>;
}
