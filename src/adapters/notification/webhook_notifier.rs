//! Chat webhook notifier.
//!
//! POSTs `{channel, content, event}` as JSON to a chat webhook
//! (Discord/Slack-style incoming webhook).

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::ports::{NotificationError, NotificationMessage, Notifier};

/// Notifier backed by an incoming-webhook URL.
///
/// The URL embeds a bearer token on most chat platforms, so it is held
/// as a secret and never logged.
pub struct WebhookNotifier {
    url: SecretString,
    http_client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: SecretString, timeout: Duration) -> Result<Self, NotificationError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        Ok(Self { url, http_client })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, message: NotificationMessage) -> Result<(), NotificationError> {
        let response = self
            .http_client
            .post(self.url.expose_secret())
            .json(&message)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        tracing::debug!(
            channel = %message.channel,
            event_id = %message.event.event_id,
            "Notification delivered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventEnvelope, EventId, Timestamp};

    fn message() -> NotificationMessage {
        NotificationMessage {
            channel: "#registrations".to_string(),
            content: "hello".to_string(),
            event: EventEnvelope {
                event_id: EventId::from_string("evt-1"),
                event_type: "registration.succeeded.v1".to_string(),
                schema_version: 1,
                aggregate_id: "reg-1".to_string(),
                aggregate_type: "Registration".to_string(),
                occurred_at: Timestamp::now(),
                payload: serde_json::json!({}),
            },
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let notifier = WebhookNotifier::new(
            SecretString::new("http://127.0.0.1:9/hook".to_string()),
            Duration::from_millis(500),
        )
        .unwrap();

        let err = notifier.send(message()).await.unwrap_err();

        assert!(matches!(err, NotificationError::Transport(_)));
        assert!(!err.to_string().contains("/hook"));
    }

    #[test]
    fn message_serializes_expected_shape() {
        let json = serde_json::to_value(message()).unwrap();
        assert_eq!(json["channel"], "#registrations");
        assert_eq!(json["content"], "hello");
        assert_eq!(json["event"]["event_type"], "registration.succeeded.v1");
    }
}
