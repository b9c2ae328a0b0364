//! HTTP handlers for cart endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::cart::{
    AddCartLineCommand, ClearCartCommand, GetCartQuery, SetLineQuantityCommand,
};
use crate::domain::cart::VariantKey;

use super::dto::{AddLineRequest, CartResponse, SetQuantityRequest, SetQuantityResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::CartSession;
use crate::adapters::http::state::AppState;

/// GET /api/cart - Current cart for the session
pub async fn get_cart(
    State(state): State<AppState>,
    CartSession(session): CartSession,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state
        .get_cart_handler()
        .handle(GetCartQuery { session })
        .await?;

    Ok(Json(CartResponse::from(&cart)))
}

/// POST /api/cart/lines - Add a line or more units of an existing one
pub async fn add_line(
    State(state): State<AppState>,
    CartSession(session): CartSession,
    Json(request): Json<AddLineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = AddCartLineCommand {
        session,
        product_ref: request.product_ref()?,
        customization: request.customization()?,
        quantity: request.quantity()?,
    };

    let result = state.add_line_handler().handle(cmd).await?;

    Ok((StatusCode::OK, Json(CartResponse::from(&result.cart))))
}

/// PUT /api/cart/lines/:variant_key - Set a line's quantity (0 removes)
pub async fn set_line_quantity(
    State(state): State<AppState>,
    CartSession(session): CartSession,
    Path(variant_key): Path<String>,
    Json(request): Json<SetQuantityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SetLineQuantityCommand {
        session,
        variant_key: VariantKey::from_raw(variant_key),
        quantity: request.quantity(),
    };

    let result = state.set_quantity_handler().handle(cmd).await?;

    Ok(Json(SetQuantityResponse {
        updated: result.updated,
        cart: CartResponse::from(&result.cart),
    }))
}

/// DELETE /api/cart - Empty the cart
pub async fn clear_cart(
    State(state): State<AppState>,
    CartSession(session): CartSession,
) -> Result<impl IntoResponse, ApiError> {
    state
        .clear_cart_handler()
        .handle(ClearCartCommand { session })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
