//! CheckoutCartHandler - Creates a checkout session from a persisted cart.

use std::sync::Arc;

use crate::domain::cart::CartError;
use crate::domain::checkout::CheckoutError;
use crate::domain::foundation::{CartSessionId, UserId};
use crate::ports::CartStore;

use super::{
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler, CreateCheckoutSessionResult,
};

/// Command to check out the cart stored under `session`.
#[derive(Debug, Clone)]
pub struct CheckoutCartCommand {
    pub session: CartSessionId,
    pub buyer_id: Option<UserId>,
}

pub struct CheckoutCartHandler {
    cart_store: Arc<dyn CartStore>,
    create_session: Arc<CreateCheckoutSessionHandler>,
}

impl CheckoutCartHandler {
    pub fn new(
        cart_store: Arc<dyn CartStore>,
        create_session: Arc<CreateCheckoutSessionHandler>,
    ) -> Self {
        Self {
            cart_store,
            create_session,
        }
    }

    /// The cart is left in place; it is cleared when payment is confirmed.
    pub async fn handle(
        &self,
        cmd: CheckoutCartCommand,
    ) -> Result<CreateCheckoutSessionResult, CheckoutError> {
        let cart = self
            .cart_store
            .load(&cmd.session)
            .await
            .map_err(CartError::from)?;

        self.create_session
            .handle(CreateCheckoutSessionCommand {
                buyer_id: cmd.buyer_id,
                lines: cart.into_lines(),
                cart_session: Some(cmd.session),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::StaticPriceCatalog;
    use crate::adapters::memory::InMemoryCartStore;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::application::handlers::checkout::CheckoutUrls;
    use crate::domain::cart::Cart;
    use crate::domain::checkout::CART_SESSION_METADATA;
    use crate::domain::foundation::ProductRef;

    fn setup() -> (Arc<InMemoryCartStore>, MockPaymentProvider, CheckoutCartHandler) {
        let store = Arc::new(InMemoryCartStore::new());
        let provider = MockPaymentProvider::new();
        let create = CreateCheckoutSessionHandler::new(
            Arc::new(provider.clone()),
            Arc::new(
                StaticPriceCatalog::new(Vec::<(String, String)>::new()).with_passthrough(true),
            ),
            CheckoutUrls {
                success_url: "https://shop.example/ok".to_string(),
                cancel_url: "https://shop.example/cart".to_string(),
            },
        );
        let handler = CheckoutCartHandler::new(store.clone(), Arc::new(create));
        (store, provider, handler)
    }

    #[tokio::test]
    async fn empty_stored_cart_is_rejected() {
        let (_store, provider, handler) = setup();

        let err = handler
            .handle(CheckoutCartCommand {
                session: CartSessionId::new(),
                buyer_id: Some(UserId::new("buyer-1").unwrap()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Validation(_)));
        assert_eq!(provider.call_count("create_checkout_session"), 0);
    }

    #[tokio::test]
    async fn stored_cart_is_checked_out_and_kept() {
        let (store, provider, handler) = setup();
        let session = CartSessionId::new();
        let mut cart = Cart::new();
        cart.add_line(ProductRef::new("price_shuttles").unwrap(), None, 3)
            .unwrap();
        store.save(&session, &cart).await.unwrap();

        handler
            .handle(CheckoutCartCommand {
                session,
                buyer_id: Some(UserId::new("buyer-1").unwrap()),
            })
            .await
            .unwrap();

        let request = &provider.checkout_requests()[0];
        assert_eq!(request.line_items[0].price_ref.as_str(), "price_shuttles");
        assert_eq!(request.line_items[0].quantity, 3);
        assert_eq!(
            request.metadata.get(CART_SESSION_METADATA),
            Some(&session.to_string())
        );
        assert!(!store.load(&session).await.unwrap().is_empty());
    }
}
