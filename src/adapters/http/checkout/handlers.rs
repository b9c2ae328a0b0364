//! HTTP handlers for checkout and payment webhook endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::checkout::{
    CheckoutCartCommand, CreateCheckoutSessionCommand, HandlePaymentWebhookCommand,
};
use crate::domain::checkout::CheckoutError;

use super::dto::{CheckoutLinesRequest, CheckoutResponse, WebhookResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{AuthenticatedUser, CartSession};
use crate::adapters::http::state::AppState;

const STRIPE_SIGNATURE_HEADER: &str = "Stripe-Signature";

/// POST /api/checkout - Check out the session's stored cart
///
/// A missing `X-User-Id` is a validation failure here, not a 401: the
/// buyer is part of the checkout input.
pub async fn checkout_cart(
    State(state): State<AppState>,
    CartSession(session): CartSession,
    user: Option<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CheckoutCartCommand {
        session,
        buyer_id: user.map(|u| u.user_id),
    };

    let result = state.checkout_cart_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(CheckoutResponse::from(result))))
}

/// POST /api/checkout/sessions - Check out explicit lines
pub async fn checkout_lines(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
    Json(request): Json<CheckoutLinesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateCheckoutSessionCommand {
        buyer_id: user.map(|u| u.user_id),
        lines: request.into_lines()?,
        cart_session: None,
    };

    let result = state.create_checkout_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(CheckoutResponse::from(result))))
}

/// POST /api/webhooks/stripe - Handle Stripe webhook events
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(CheckoutError::InvalidWebhookSignature)?;

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    let outcome = state.webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookResponse::from(outcome)))
}
