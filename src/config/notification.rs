//! Notification configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Registration announcement settings.
///
/// Without a webhook URL announcements are only logged.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Chat webhook URL (treated as a secret; it embeds a token)
    pub webhook_url: Option<String>,

    /// Channel named in each message
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Upper bound on one delivery, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl NotificationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.webhook_url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ValidationError::InvalidNotificationUrl);
            }
        }
        if self.timeout_ms == 0 || self.timeout_ms > 60_000 {
            return Err(ValidationError::InvalidNotificationTimeout);
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            channel: default_channel(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_channel() -> String {
    "#registrations".to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_log_only() {
        let config = NotificationConfig::default();
        assert!(config.webhook_url.is_none());
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_webhook() {
        let config = NotificationConfig {
            webhook_url: Some("ftp://chat.example/hook".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = NotificationConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
