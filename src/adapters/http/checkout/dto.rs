//! DTOs for checkout endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::cart::dto::AddLineRequest;
use crate::application::handlers::checkout::{CreateCheckoutSessionResult, WebhookOutcome};
use crate::domain::cart::{Cart, CartLine, CartError};

/// Request to check out explicit lines instead of the stored cart.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutLinesRequest {
    pub lines: Vec<AddLineRequest>,
}

impl CheckoutLinesRequest {
    /// Folds the submitted lines through a cart so duplicates merge.
    pub fn into_lines(self) -> Result<Vec<CartLine>, CartError> {
        let mut cart = Cart::new();
        for line in &self.lines {
            cart.add_line(line.product_ref()?, line.customization()?, line.quantity()?)?;
        }
        Ok(cart.into_lines())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
    pub session_id: String,
    pub expires_at: i64,
}

impl From<CreateCheckoutSessionResult> for CheckoutResponse {
    fn from(result: CreateCheckoutSessionResult) -> Self {
        Self {
            checkout_url: result.session.url,
            session_id: result.session.id,
            expires_at: result.session.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WebhookResponse {
    CartCleared { checkout_session_id: String },
    Acknowledged,
    Ignored,
}

impl From<WebhookOutcome> for WebhookResponse {
    fn from(outcome: WebhookOutcome) -> Self {
        match outcome {
            WebhookOutcome::CartCleared {
                checkout_session_id,
                ..
            } => WebhookResponse::CartCleared {
                checkout_session_id,
            },
            WebhookOutcome::Acknowledged { .. } => WebhookResponse::Acknowledged,
            WebhookOutcome::Ignored { .. } => WebhookResponse::Ignored,
        }
    }
}
