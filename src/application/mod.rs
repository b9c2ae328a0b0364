//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
pub mod notification_dispatcher;

pub use handlers::*;
pub use notification_dispatcher::{
    format_message, DispatchHandle, DispatchOutcome, NotificationDispatcher,
    DEFAULT_NOTIFY_TIMEOUT,
};
