//! Notifier adapters.
//!
//! - `WebhookNotifier` - JSON POST to a chat webhook
//! - `LogNotifier` - Log-only fallback
//! - `RecordingNotifier` - Captures messages for tests

mod log_notifier;
mod recording_notifier;
mod webhook_notifier;

pub use log_notifier::LogNotifier;
pub use recording_notifier::RecordingNotifier;
pub use webhook_notifier::WebhookNotifier;
