//! Notifier that only logs. Used when no chat webhook is configured.

use async_trait::async_trait;

use crate::ports::{NotificationError, NotificationMessage, Notifier};

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: NotificationMessage) -> Result<(), NotificationError> {
        tracing::info!(
            channel = %message.channel,
            event_type = %message.event.event_type,
            aggregate_id = %message.event.aggregate_id,
            content = %message.content,
            "Notification (log only)"
        );
        Ok(())
    }
}
