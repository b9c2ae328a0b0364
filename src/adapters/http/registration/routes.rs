//! Axum router configuration for registration endpoints.

use axum::{routing::post, Router};

use super::handlers::register_for_tournament;
use crate::adapters::http::state::AppState;

/// # Routes
/// - `POST /:tournament_id/registrations` - Spend a pass on an entry
pub fn registration_routes() -> Router<AppState> {
    Router::new().route("/:tournament_id/registrations", post(register_for_tournament))
}
