//! Recording notifier for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::ports::{NotificationError, NotificationMessage, Notifier};

/// Captures every message; can be told to fail or stall.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<NotificationMessage>>>,
    failure: Arc<Mutex<Option<NotificationError>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails with `error`.
    pub fn failing(error: NotificationError) -> Self {
        let notifier = Self::new();
        *notifier.failure.lock().unwrap() = Some(error);
        notifier
    }

    /// A notifier that sleeps for `delay` before recording.
    pub fn stalling(delay: Duration) -> Self {
        let notifier = Self::new();
        *notifier.delay.lock().unwrap() = Some(delay);
        notifier
    }

    pub fn sent(&self) -> Vec<NotificationMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: NotificationMessage) -> Result<(), NotificationError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }

        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
