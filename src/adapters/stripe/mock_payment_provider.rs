//! Mock payment provider for testing.
//!
//! Records every checkout request, returns configurable sessions, and
//! supports error injection and canned webhook events.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::checkout::CART_SESSION_METADATA;
use crate::ports::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentProvider, WebhookEvent,
    WebhookEventData, WebhookEventType,
};

/// Mock payment provider for testing.
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.set_method_error("create_checkout_session", PaymentError::network("down"));
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_checkout: Option<CheckoutSession>,
    next_webhook_event: Option<WebhookEvent>,
    method_errors: HashMap<String, PaymentError>,
    checkout_requests: Vec<CheckoutRequest>,
    call_log: Vec<String>,
    reject_webhooks: bool,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().reject_webhooks = true;
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the session returned by the next `create_checkout_session` call.
    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.inner.lock().unwrap().next_checkout = Some(session);
    }

    /// Set the event returned by every `verify_webhook` call.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.inner.lock().unwrap().next_webhook_event = Some(event);
    }

    /// Fail every call to `method` with `error`.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        self.inner.lock().unwrap().method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertions
    // ════════════════════════════════════════════════════════════════════════════

    /// Checkout requests received, in order.
    pub fn checkout_requests(&self) -> Vec<CheckoutRequest> {
        self.inner.lock().unwrap().checkout_requests.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|m| m.as_str() == method)
            .count()
    }

    fn begin_call(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(method.to_string());
        match state.method_errors.get(method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Canned Events
    // ════════════════════════════════════════════════════════════════════════════

    /// A completed checkout whose metadata points at `cart_session_id`.
    pub fn checkout_completed_event(
        session_id: &str,
        cart_session_id: Option<&str>,
    ) -> WebhookEvent {
        let mut metadata = BTreeMap::new();
        if let Some(cart) = cart_session_id {
            metadata.insert(CART_SESSION_METADATA.to_string(), cart.to_string());
        }

        WebhookEvent {
            id: format!("evt_mock_{}", session_id),
            event_type: WebhookEventType::CheckoutSessionCompleted,
            data: WebhookEventData::Checkout {
                session_id: session_id.to_string(),
                payment_status: Some("paid".to_string()),
                metadata,
            },
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.begin_call("create_checkout_session")?;

        let mut state = self.inner.lock().unwrap();
        state.checkout_requests.push(request);

        let session = state.next_checkout.take().unwrap_or_else(|| {
            let id = format!("cs_mock_{}", Uuid::new_v4().simple());
            CheckoutSession {
                url: format!("https://checkout.stripe.com/c/pay/{}", id),
                id,
                expires_at: chrono::Utc::now().timestamp() + 24 * 60 * 60,
            }
        });

        Ok(session)
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.begin_call("verify_webhook")?;

        let state = self.inner.lock().unwrap();
        if state.reject_webhooks {
            return Err(PaymentError::invalid_webhook("Verification disabled"));
        }

        if let Some(event) = &state.next_webhook_event {
            return Ok(event.clone());
        }

        let parsed: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;

        let event_type = match parsed["type"].as_str().unwrap_or("unknown") {
            "checkout.session.completed" => WebhookEventType::CheckoutSessionCompleted,
            "checkout.session.expired" => WebhookEventType::CheckoutSessionExpired,
            other => WebhookEventType::Unknown(other.to_string()),
        };

        Ok(WebhookEvent {
            id: parsed["id"].as_str().unwrap_or("evt_mock").to_string(),
            event_type,
            data: WebhookEventData::Raw {
                json: String::from_utf8_lossy(payload).to_string(),
            },
            created_at: parsed["created"]
                .as_i64()
                .unwrap_or_else(|| chrono::Utc::now().timestamp()),
        })
    }
}
