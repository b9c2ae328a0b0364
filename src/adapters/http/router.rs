//! Top-level API router.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use super::cart::cart_routes;
use super::checkout::{checkout_routes, webhook_routes};
use super::registration::registration_routes;
use super::state::AppState;

/// Builds the full application router.
///
/// # Routes
/// - `GET /health`
/// - `/api/cart/...`
/// - `/api/checkout/...`
/// - `/api/tournaments/...`
/// - `/api/webhooks/...`
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/tournaments", registration_routes())
        .nest("/webhooks", webhook_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
