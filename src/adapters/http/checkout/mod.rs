//! HTTP adapter for checkout and payment webhooks.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{checkout_routes, webhook_routes};
