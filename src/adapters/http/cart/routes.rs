//! Axum router configuration for cart endpoints.

use axum::{
    routing::{get, put, post},
    Router,
};

use super::handlers::{add_line, clear_cart, get_cart, set_line_quantity};
use crate::adapters::http::state::AppState;

/// # Routes
/// - `GET /` - Current cart
/// - `DELETE /` - Clear the cart
/// - `POST /lines` - Add a line
/// - `PUT /lines/:variant_key` - Set a line's quantity
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).delete(clear_cart))
        .route("/lines", post(add_line))
        .route("/lines/:variant_key", put(set_line_quantity))
}
