//! HandlePaymentWebhookHandler - Confirms payments reported by the provider.
//!
//! ## Events Handled
//!
//! - `checkout.session.completed` - Clears the cart the session was created from
//! - `checkout.session.expired` - Acknowledged; the cart stays for a retry
//!
//! Anything else is ignored. The provider retries on any non-2xx response,
//! so only storage failures are returned as errors.

use std::sync::Arc;

use crate::domain::checkout::{CheckoutError, CART_SESSION_METADATA};
use crate::domain::foundation::CartSessionId;
use crate::ports::{CartStore, PaymentProvider, WebhookEventData, WebhookEventType};

/// Command carrying the raw webhook request.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    pub payload: Vec<u8>,
    pub signature: String,
}

/// What the webhook did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    CartCleared {
        checkout_session_id: String,
        cart_session: CartSessionId,
    },
    Acknowledged {
        event_id: String,
    },
    Ignored {
        event_type: String,
    },
}

pub struct HandlePaymentWebhookHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    cart_store: Arc<dyn CartStore>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, cart_store: Arc<dyn CartStore>) -> Self {
        Self {
            payment_provider,
            cart_store,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<WebhookOutcome, CheckoutError> {
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Payment webhook verification failed");
                CheckoutError::from(err)
            })?;

        match event.event_type {
            WebhookEventType::CheckoutSessionCompleted => {
                let WebhookEventData::Checkout {
                    session_id,
                    metadata,
                    ..
                } = event.data
                else {
                    tracing::warn!(event_id = %event.id, "Completed checkout without session data");
                    return Ok(WebhookOutcome::Acknowledged { event_id: event.id });
                };

                let cart_session = metadata
                    .get(CART_SESSION_METADATA)
                    .and_then(|raw| CartSessionId::parse(raw).ok());

                let Some(cart_session) = cart_session else {
                    tracing::info!(
                        event_id = %event.id,
                        checkout_session_id = %session_id,
                        "Completed checkout carries no cart session"
                    );
                    return Ok(WebhookOutcome::Acknowledged { event_id: event.id });
                };

                self.cart_store
                    .clear(&cart_session)
                    .await
                    .map_err(|err| CheckoutError::CartStorage(err.to_string()))?;

                tracing::info!(
                    event_id = %event.id,
                    checkout_session_id = %session_id,
                    cart_session_id = %cart_session,
                    "Checkout completed, cart cleared"
                );

                Ok(WebhookOutcome::CartCleared {
                    checkout_session_id: session_id,
                    cart_session,
                })
            }
            WebhookEventType::CheckoutSessionExpired => {
                tracing::info!(event_id = %event.id, "Checkout session expired");
                Ok(WebhookOutcome::Acknowledged { event_id: event.id })
            }
            WebhookEventType::Unknown(event_type) => {
                tracing::debug!(
                    event_id = %event.id,
                    event_type = %event_type,
                    "Ignoring webhook event"
                );
                Ok(WebhookOutcome::Ignored { event_type })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCartStore;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::cart::Cart;
    use crate::domain::foundation::{DomainError, ErrorCode, ProductRef};
    use crate::ports::WebhookEvent;
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    struct BrokenCartStore;

    #[async_trait]
    impl CartStore for BrokenCartStore {
        async fn load(&self, _session: &CartSessionId) -> Result<Cart, DomainError> {
            Ok(Cart::new())
        }

        async fn save(&self, _session: &CartSessionId, _cart: &Cart) -> Result<(), DomainError> {
            Ok(())
        }

        async fn clear(&self, _session: &CartSessionId) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::CartStorageFailed, "redis down"))
        }
    }

    fn command() -> HandlePaymentWebhookCommand {
        HandlePaymentWebhookCommand {
            payload: br#"{"id":"evt_1"}"#.to_vec(),
            signature: "t=1,v1=abc".to_string(),
        }
    }

    async fn stored_cart(store: &InMemoryCartStore) -> CartSessionId {
        let session = CartSessionId::new();
        let mut cart = Cart::new();
        cart.add_line(ProductRef::new("racket-pro").unwrap(), None, 1)
            .unwrap();
        store.save(&session, &cart).await.unwrap();
        session
    }

    #[tokio::test]
    async fn completed_checkout_clears_cart() {
        let store = Arc::new(InMemoryCartStore::new());
        let session = stored_cart(&store).await;
        let provider = MockPaymentProvider::new();
        provider.set_webhook_event(MockPaymentProvider::checkout_completed_event(
            "cs_test_1",
            Some(&session.to_string()),
        ));
        let handler = HandlePaymentWebhookHandler::new(Arc::new(provider), store.clone());

        let outcome = handler.handle(command()).await.unwrap();

        assert_eq!(
            outcome,
            WebhookOutcome::CartCleared {
                checkout_session_id: "cs_test_1".to_string(),
                cart_session: session,
            }
        );
        assert!(store.load(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn completed_checkout_without_cart_is_acknowledged() {
        let store = Arc::new(InMemoryCartStore::new());
        let session = stored_cart(&store).await;
        let provider = MockPaymentProvider::new();
        provider.set_webhook_event(MockPaymentProvider::checkout_completed_event(
            "cs_test_2",
            None,
        ));
        let handler = HandlePaymentWebhookHandler::new(Arc::new(provider), store.clone());

        let outcome = handler.handle(command()).await.unwrap();

        assert!(matches!(outcome, WebhookOutcome::Acknowledged { .. }));
        assert!(!store.load(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_event_is_ignored() {
        let provider = MockPaymentProvider::new();
        provider.set_webhook_event(WebhookEvent {
            id: "evt_9".to_string(),
            event_type: WebhookEventType::Unknown("invoice.paid".to_string()),
            data: WebhookEventData::Raw {
                json: "{}".to_string(),
            },
            created_at: 0,
        });
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(provider),
            Arc::new(InMemoryCartStore::new()),
        );

        let outcome = handler.handle(command()).await.unwrap();

        assert_eq!(
            outcome,
            WebhookOutcome::Ignored {
                event_type: "invoice.paid".to_string()
            }
        );
    }

    #[tokio::test]
    async fn invalid_signature_is_rejected() {
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockPaymentProvider::rejecting_webhooks()),
            Arc::new(InMemoryCartStore::new()),
        );

        let err = handler.handle(command()).await.unwrap_err();

        assert_eq!(err, CheckoutError::InvalidWebhookSignature);
    }

    #[tokio::test]
    async fn clear_failure_is_returned_for_provider_retry() {
        let provider = MockPaymentProvider::new();
        let mut metadata = BTreeMap::new();
        metadata.insert(
            CART_SESSION_METADATA.to_string(),
            CartSessionId::new().to_string(),
        );
        provider.set_webhook_event(WebhookEvent {
            id: "evt_3".to_string(),
            event_type: WebhookEventType::CheckoutSessionCompleted,
            data: WebhookEventData::Checkout {
                session_id: "cs_test_3".to_string(),
                payment_status: Some("paid".to_string()),
                metadata,
            },
            created_at: 0,
        });
        let handler =
            HandlePaymentWebhookHandler::new(Arc::new(provider), Arc::new(BrokenCartStore));

        let err = handler.handle(command()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::CartStorageFailed);
        assert!(err.is_retryable());
    }
}
