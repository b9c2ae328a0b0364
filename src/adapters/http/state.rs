//! Shared application state for HTTP handlers.

use std::sync::Arc;

use crate::application::handlers::cart::{
    AddCartLineHandler, ClearCartHandler, GetCartHandler, SetLineQuantityHandler,
};
use crate::application::handlers::checkout::{
    CheckoutCartHandler, CheckoutUrls, CreateCheckoutSessionHandler, HandlePaymentWebhookHandler,
};
use crate::application::handlers::registration::RegisterForEventHandler;
use crate::application::NotificationDispatcher;
use crate::ports::{CartStore, PaymentProvider, PriceCatalog, RegistrationStore};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; dependencies are Arc-wrapped and handlers are
/// created on demand.
#[derive(Clone)]
pub struct AppState {
    pub cart_store: Arc<dyn CartStore>,
    pub registration_store: Arc<dyn RegistrationStore>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub price_catalog: Arc<dyn PriceCatalog>,
    pub checkout_urls: CheckoutUrls,
    pub dispatcher: NotificationDispatcher,
}

impl AppState {
    pub fn add_line_handler(&self) -> AddCartLineHandler {
        AddCartLineHandler::new(self.cart_store.clone())
    }

    pub fn set_quantity_handler(&self) -> SetLineQuantityHandler {
        SetLineQuantityHandler::new(self.cart_store.clone())
    }

    pub fn clear_cart_handler(&self) -> ClearCartHandler {
        ClearCartHandler::new(self.cart_store.clone())
    }

    pub fn get_cart_handler(&self) -> GetCartHandler {
        GetCartHandler::new(self.cart_store.clone())
    }

    pub fn create_checkout_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(
            self.payment_provider.clone(),
            self.price_catalog.clone(),
            self.checkout_urls.clone(),
        )
    }

    pub fn checkout_cart_handler(&self) -> CheckoutCartHandler {
        CheckoutCartHandler::new(
            self.cart_store.clone(),
            Arc::new(self.create_checkout_handler()),
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.payment_provider.clone(), self.cart_store.clone())
    }

    pub fn register_handler(&self) -> RegisterForEventHandler {
        RegisterForEventHandler::new(self.registration_store.clone(), self.dispatcher.clone())
    }
}
