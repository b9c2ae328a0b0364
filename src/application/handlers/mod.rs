//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod cart;
pub mod checkout;
pub mod registration;

pub use cart::{
    AddCartLineCommand, AddCartLineHandler, AddCartLineResult, ClearCartCommand,
    ClearCartHandler, GetCartHandler, GetCartQuery, SetLineQuantityCommand,
    SetLineQuantityHandler, SetLineQuantityResult,
};
pub use checkout::{
    CheckoutCartCommand, CheckoutCartHandler, CheckoutUrls, CreateCheckoutSessionCommand,
    CreateCheckoutSessionHandler, CreateCheckoutSessionResult, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler, WebhookOutcome,
};
pub use registration::{RegisterForEventCommand, RegisterForEventHandler, RegisterForEventResult};
