//! Checkout handlers.
//!
//! ## Commands
//! - Create a checkout session from explicit lines
//! - Check out a stored cart
//! - Handle payment provider webhooks

mod checkout_cart;
mod create_checkout_session;
mod handle_payment_webhook;

pub use checkout_cart::{CheckoutCartCommand, CheckoutCartHandler};
pub use create_checkout_session::{
    CheckoutUrls, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
    CreateCheckoutSessionResult,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookOutcome,
};
