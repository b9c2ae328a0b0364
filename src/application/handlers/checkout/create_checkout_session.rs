//! CreateCheckoutSessionHandler - Turns cart lines into a hosted payment session.
//!
//! Each normalized line becomes exactly one priced line item. The payment
//! provider is called at most once per command and never for an empty cart.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::cart::{normalize, CartLine};
use crate::domain::checkout::{CheckoutError, PricedLineItem, CART_SESSION_METADATA};
use crate::domain::foundation::{CartSessionId, UserId, ValidationError};
use crate::ports::{CheckoutRequest, CheckoutSession, PaymentProvider, PriceCatalog};

/// Redirect targets handed to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
}

/// Command to create a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    pub buyer_id: Option<UserId>,
    pub lines: Vec<CartLine>,
    /// Cart to clear once the provider confirms payment.
    pub cart_session: Option<CartSessionId>,
}

/// Result of creating a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionResult {
    pub session: CheckoutSession,
    pub line_count: usize,
}

impl CreateCheckoutSessionResult {
    pub fn url(&self) -> &str {
        &self.session.url
    }
}

/// Handler for creating checkout sessions.
pub struct CreateCheckoutSessionHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    price_catalog: Arc<dyn PriceCatalog>,
    urls: CheckoutUrls,
}

impl CreateCheckoutSessionHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        price_catalog: Arc<dyn PriceCatalog>,
        urls: CheckoutUrls,
    ) -> Self {
        Self {
            payment_provider,
            price_catalog,
            urls,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CreateCheckoutSessionResult, CheckoutError> {
        // 1. Validate buyer and cart before anything leaves the process
        let buyer_id = cmd
            .buyer_id
            .ok_or_else(|| ValidationError::empty_field("buyer_id"))?;

        let lines = normalize(cmd.lines);
        if lines.is_empty() {
            return Err(ValidationError::empty_field("lines").into());
        }

        // 2. Resolve one price per line
        let line_items = lines
            .iter()
            .map(|line| {
                self.price_catalog
                    .price_for(&line.product_ref)
                    .map(|price| PricedLineItem::for_line(line, price))
                    .ok_or_else(|| {
                        ValidationError::invalid_format(
                            "product_ref",
                            format!("No price configured for '{}'", line.product_ref),
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut metadata = BTreeMap::new();
        if let Some(cart_session) = cmd.cart_session {
            metadata.insert(CART_SESSION_METADATA.to_string(), cart_session.to_string());
        }

        let line_count = line_items.len();
        let request = CheckoutRequest {
            buyer_id: buyer_id.clone(),
            line_items,
            success_url: self.urls.success_url.clone(),
            cancel_url: self.urls.cancel_url.clone(),
            metadata,
        };

        // 3. Create the external session
        let session = self
            .payment_provider
            .create_checkout_session(request)
            .await
            .map_err(|err| {
                tracing::warn!(
                    buyer_id = %buyer_id,
                    error = %err,
                    retryable = err.retryable,
                    "Checkout session creation failed"
                );
                CheckoutError::from(err)
            })?;

        tracing::info!(
            buyer_id = %buyer_id,
            checkout_session_id = %session.id,
            line_count,
            "Checkout session created"
        );

        Ok(CreateCheckoutSessionResult {
            session,
            line_count,
        })
    }
}
