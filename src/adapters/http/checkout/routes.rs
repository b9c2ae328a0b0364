//! Axum router configuration for checkout endpoints.

use axum::{routing::post, Router};

use super::handlers::{checkout_cart, checkout_lines, handle_stripe_webhook};
use crate::adapters::http::state::AppState;

/// # Routes
/// - `POST /` - Check out the stored cart
/// - `POST /sessions` - Check out explicit lines
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout_cart))
        .route("/sessions", post(checkout_lines))
}

/// Webhooks carry no user identity; they are verified by signature.
///
/// # Routes
/// - `POST /stripe` - Handle Stripe webhooks
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/stripe", post(handle_stripe_webhook))
}
