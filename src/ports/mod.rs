//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Registration
//!
//! - `RegistrationStore` - Tournaments, passes and the atomic consume-and-register
//! - `Notifier` - Best-effort chat notifications
//!
//! ## Cart & Checkout
//!
//! - `CartStore` - Per-session cart persistence
//! - `PriceCatalog` - Product to payment price resolution
//! - `PaymentProvider` - Hosted checkout sessions and webhook verification

mod cart_store;
mod notifier;
mod payment_provider;
mod price_catalog;
mod registration_store;

pub use cart_store::CartStore;
pub use notifier::{NotificationError, NotificationMessage, Notifier};
pub use payment_provider::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentErrorCode, PaymentProvider,
    WebhookEvent, WebhookEventData, WebhookEventType,
};
pub use price_catalog::PriceCatalog;
pub use registration_store::{ConsumeOutcome, ConsumePass, RegistrationStore};
