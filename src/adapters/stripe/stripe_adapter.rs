//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API:
//! one-off (`mode=payment`) checkout sessions and webhook verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay attack prevention
//! - Secrets handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key, webhook_secret);
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::ports::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentErrorCode, PaymentProvider,
    WebhookEvent, WebhookEventData, WebhookEventType,
};

use super::webhook_types::{
    SignatureHeader, StripeCheckoutSession, StripeErrorResponse, StripeWebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Stripe's default checkout session lifetime.
const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Whether to reject test-mode events.
    require_livemode: bool,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            require_livemode: false,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Require livemode events in production.
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Flattens a checkout request into Stripe's form encoding.
    ///
    /// Stripe line items carry no metadata of their own, so each line's
    /// metadata is folded into the session metadata as `line_{i}_{key}`.
    fn checkout_form(request: &CheckoutRequest) -> Vec<(String, String)> {
        let mut params = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
            (
                "client_reference_id".to_string(),
                request.buyer_id.to_string(),
            ),
            (
                "metadata[buyer_id]".to_string(),
                request.buyer_id.to_string(),
            ),
        ];

        for (key, value) in &request.metadata {
            params.push((format!("metadata[{}]", key), value.clone()));
        }

        for (i, item) in request.line_items.iter().enumerate() {
            params.push((
                format!("line_items[{}][price]", i),
                item.price_ref.to_string(),
            ));
            params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
            for (key, value) in &item.metadata {
                params.push((format!("metadata[line_{}_{}]", i, key), value.clone()));
            }
        }

        params
    }

    /// Maps a non-success Stripe response to a payment error.
    fn api_error(status: reqwest::StatusCode, body: &str) -> PaymentError {
        let parsed = serde_json::from_str::<StripeErrorResponse>(body).ok();
        let message = parsed
            .as_ref()
            .map(|e| e.error.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Stripe API error ({})", status));

        let code = match status.as_u16() {
            401 | 403 => PaymentErrorCode::AuthenticationError,
            429 => PaymentErrorCode::RateLimitExceeded,
            400..=499 => PaymentErrorCode::InvalidRequest,
            _ => PaymentErrorCode::ProviderError,
        };

        let error = PaymentError::new(code, message);
        match parsed.and_then(|e| e.error.code) {
            Some(provider_code) => error.with_provider_code(provider_code),
            None => error,
        }
    }

    /// Verify webhook signature using HMAC-SHA256.
    ///
    /// # Security
    ///
    /// - Uses constant-time comparison to prevent timing attacks
    /// - Validates timestamp to prevent replay attacks
    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
    ) -> Result<(), PaymentError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - header.timestamp;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event from future - clock skew or manipulation"
            );
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        let mut mac =
            HmacSha256::new_from_slice(self.config.webhook_secret.expose_secret().as_bytes())
                .map_err(|e| PaymentError::invalid_webhook(format!("Unusable secret: {}", e)))?;
        mac.update(header.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = mac.finalize().into_bytes();

        let matched = header
            .v1_signatures
            .iter()
            .any(|provided| expected.as_slice().ct_eq(provided.as_slice()).into());

        if !matched {
            tracing::warn!(
                candidates = header.v1_signatures.len(),
                "Invalid webhook signature"
            );
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        Ok(())
    }

    /// Parse a Stripe event and convert to port types.
    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        if self.config.require_livemode && !stripe_event.livemode {
            tracing::warn!(
                event_id = %stripe_event.id,
                "Rejected test mode event in production"
            );
            return Err(PaymentError::invalid_webhook(
                "Test mode events not allowed in production",
            ));
        }

        let event_type = match stripe_event.event_type.as_str() {
            "checkout.session.completed" => WebhookEventType::CheckoutSessionCompleted,
            "checkout.session.expired" => WebhookEventType::CheckoutSessionExpired,
            other => WebhookEventType::Unknown(other.to_string()),
        };

        let data = match event_type {
            WebhookEventType::CheckoutSessionCompleted
            | WebhookEventType::CheckoutSessionExpired => {
                let session: StripeCheckoutSession =
                    serde_json::from_value(stripe_event.data.object.clone()).map_err(|e| {
                        PaymentError::invalid_webhook(format!("Invalid checkout session: {}", e))
                    })?;

                WebhookEventData::Checkout {
                    session_id: session.id,
                    payment_status: session.payment_status,
                    metadata: session.metadata,
                }
            }
            WebhookEventType::Unknown(_) => WebhookEventData::Raw {
                json: stripe_event.data.object.to_string(),
            },
        };

        Ok(WebhookEvent {
            id: stripe_event.id,
            event_type,
            data,
            created_at: stripe_event.created,
        })
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let params = Self::checkout_form(&request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error = Self::api_error(status, &error_text);
            tracing::error!(
                status = status.as_u16(),
                code = %error.code,
                error = %error.message,
                "Stripe create_checkout_session failed"
            );
            return Err(error);
        }

        let stripe_session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        let url = stripe_session.url.ok_or_else(|| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                "Stripe returned a checkout session without a url",
            )
        })?;

        let expires_at = stripe_session
            .expires_at
            .unwrap_or_else(|| chrono::Utc::now().timestamp() + DEFAULT_SESSION_TTL_SECS);

        tracing::info!(
            session_id = %stripe_session.id,
            buyer_id = %request.buyer_id,
            line_count = request.line_items.len(),
            "Stripe checkout session created"
        );

        Ok(CheckoutSession {
            id: stripe_session.id,
            url,
            expires_at,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse Stripe-Signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;

        self.verify_signature(payload, &header)?;

        let webhook_event = self.parse_event(payload)?;

        tracing::info!(
            event_id = %webhook_event.id,
            event_type = ?webhook_event.event_type,
            "Webhook signature verified"
        );

        Ok(webhook_event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::webhook_types::hex_encode;
    use crate::domain::checkout::{PriceRef, PricedLineItem};
    use crate::domain::foundation::UserId;
    use std::collections::BTreeMap;

    fn test_config() -> StripeConfig {
        StripeConfig::new("sk_test_key", "whsec_test_secret")
    }

    fn create_test_signature(secret: &str, timestamp: i64, payload: &str) -> String {
        let signed_payload = format!("{}.{}", timestamp, payload);
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signed_payload.as_bytes());
        let result = mac.finalize().into_bytes();

        format!("t={},v1={}", timestamp, hex_encode(&result))
    }

    fn checkout_completed_payload() -> &'static str {
        r#"{
            "id": "evt_test",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": {
                "object": {
                    "id": "cs_test",
                    "object": "checkout.session",
                    "payment_status": "paid",
                    "status": "complete",
                    "mode": "payment",
                    "metadata": {"cart_session_id": "550e8400-e29b-41d4-a716-446655440000"}
                }
            },
            "livemode": false
        }"#
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn config_new_sets_defaults() {
        let config = StripeConfig::new("api_key", "webhook_secret");
        assert_eq!(config.api_base_url, "https://api.stripe.com");
        assert!(!config.require_livemode);
    }

    #[test]
    fn config_builders_apply() {
        let config = StripeConfig::new("key", "secret")
            .with_base_url("http://localhost:12111")
            .with_require_livemode(true);
        assert_eq!(config.api_base_url, "http://localhost:12111");
        assert!(config.require_livemode);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Checkout Form Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn checkout_form_maps_lines_one_to_one() {
        let mut line_meta = BTreeMap::new();
        line_meta.insert("variant_key".to_string(), "grip::white-pink".to_string());
        let mut session_meta = BTreeMap::new();
        session_meta.insert("cart_session_id".to_string(), "cart-1".to_string());

        let request = CheckoutRequest {
            buyer_id: UserId::new("user-1").unwrap(),
            line_items: vec![
                PricedLineItem {
                    price_ref: PriceRef::new("price_racket"),
                    quantity: 2,
                    metadata: BTreeMap::new(),
                },
                PricedLineItem {
                    price_ref: PriceRef::new("price_grip"),
                    quantity: 1,
                    metadata: line_meta,
                },
            ],
            success_url: "https://shop.test/ok".to_string(),
            cancel_url: "https://shop.test/cancel".to_string(),
            metadata: session_meta,
        };

        let form: BTreeMap<String, String> =
            StripePaymentAdapter::checkout_form(&request).into_iter().collect();

        assert_eq!(form["mode"], "payment");
        assert_eq!(form["line_items[0][price]"], "price_racket");
        assert_eq!(form["line_items[0][quantity]"], "2");
        assert_eq!(form["line_items[1][price]"], "price_grip");
        assert_eq!(form["metadata[line_1_variant_key]"], "grip::white-pink");
        assert_eq!(form["metadata[cart_session_id]"], "cart-1");
        assert_eq!(form["client_reference_id"], "user-1");
        assert!(!form.contains_key("line_items[2][price]"));
    }

    #[test]
    fn api_error_classifies_status() {
        let body = r#"{"error": {"type": "invalid_request_error", "code": "resource_missing", "message": "No such price"}}"#;
        let err = StripePaymentAdapter::api_error(reqwest::StatusCode::BAD_REQUEST, body);
        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);
        assert_eq!(err.message, "No such price");
        assert_eq!(err.provider_code.as_deref(), Some("resource_missing"));
        assert!(!err.retryable);

        let err = StripePaymentAdapter::api_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(err.code, PaymentErrorCode::RateLimitExceeded);
        assert!(err.retryable);

        let err = StripePaymentAdapter::api_error(reqwest::StatusCode::BAD_GATEWAY, "<html>");
        assert_eq!(err.code, PaymentErrorCode::ProviderError);
        assert!(err.message.contains("502"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn verify_signature_valid() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let timestamp = chrono::Utc::now().timestamp();
        let signature = create_test_signature("whsec_test_secret", timestamp, payload);

        let header = SignatureHeader::parse(&signature).unwrap();
        assert!(adapter.verify_signature(payload.as_bytes(), &header).is_ok());
    }

    #[test]
    fn verify_signature_wrong_secret() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let timestamp = chrono::Utc::now().timestamp();
        let signature = create_test_signature("wrong_secret", timestamp, payload);

        let header = SignatureHeader::parse(&signature).unwrap();
        let err = adapter
            .verify_signature(payload.as_bytes(), &header)
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[test]
    fn verify_signature_accepts_any_rolled_secret() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let timestamp = chrono::Utc::now().timestamp();
        let stale = create_test_signature("whsec_old", timestamp, payload);
        let current = create_test_signature("whsec_test_secret", timestamp, payload);
        let current_sig = current.split_once("v1=").unwrap().1;

        let header = SignatureHeader::parse(&format!("{},v1={}", stale, current_sig)).unwrap();
        assert!(adapter.verify_signature(payload.as_bytes(), &header).is_ok());
    }

    #[test]
    fn verify_signature_expired_timestamp() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let old_timestamp = chrono::Utc::now().timestamp() - 600;
        let signature = create_test_signature("whsec_test_secret", old_timestamp, payload);

        let header = SignatureHeader::parse(&signature).unwrap();
        let err = adapter
            .verify_signature(payload.as_bytes(), &header)
            .unwrap_err();

        assert!(err.message.contains("too old"));
    }

    #[test]
    fn verify_signature_future_timestamp() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let future_timestamp = chrono::Utc::now().timestamp() + 120;
        let signature = create_test_signature("whsec_test_secret", future_timestamp, payload);

        let header = SignatureHeader::parse(&signature).unwrap();
        let err = adapter
            .verify_signature(payload.as_bytes(), &header)
            .unwrap_err();

        assert!(err.message.contains("future"));
    }

    #[test]
    fn verify_signature_small_future_tolerance() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let timestamp = chrono::Utc::now().timestamp() + 30;
        let signature = create_test_signature("whsec_test_secret", timestamp, payload);

        let header = SignatureHeader::parse(&signature).unwrap();
        assert!(adapter.verify_signature(payload.as_bytes(), &header).is_ok());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Event Parsing Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parse_checkout_session_completed() {
        let adapter = StripePaymentAdapter::new(test_config());

        let event = adapter
            .parse_event(checkout_completed_payload().as_bytes())
            .unwrap();

        assert_eq!(event.id, "evt_test");
        assert_eq!(event.event_type, WebhookEventType::CheckoutSessionCompleted);
        match event.data {
            WebhookEventData::Checkout {
                session_id,
                payment_status,
                metadata,
            } => {
                assert_eq!(session_id, "cs_test");
                assert_eq!(payment_status.as_deref(), Some("paid"));
                assert_eq!(
                    metadata.get("cart_session_id").map(String::as_str),
                    Some("550e8400-e29b-41d4-a716-446655440000")
                );
            }
            _ => panic!("Expected Checkout data"),
        }
    }

    #[test]
    fn parse_unknown_event_type() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{
            "id": "evt_unknown",
            "type": "charge.refunded",
            "created": 1704067200,
            "data": {"object": {"foo": "bar"}},
            "livemode": false
        }"#;

        let event = adapter.parse_event(payload.as_bytes()).unwrap();

        assert!(matches!(
            event.event_type,
            WebhookEventType::Unknown(ref s) if s == "charge.refunded"
        ));
        assert!(matches!(event.data, WebhookEventData::Raw { .. }));
    }

    #[test]
    fn parse_rejects_test_mode_in_production() {
        let config = StripeConfig::new("key", "secret").with_require_livemode(true);
        let adapter = StripePaymentAdapter::new(config);

        let err = adapter
            .parse_event(checkout_completed_payload().as_bytes())
            .unwrap_err();
        assert!(err.message.contains("Test mode"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // verify_webhook full flow
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verify_webhook_valid_signature_and_payload() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = checkout_completed_payload();
        let timestamp = chrono::Utc::now().timestamp();
        let signature = create_test_signature("whsec_test_secret", timestamp, payload);

        let event = adapter
            .verify_webhook(payload.as_bytes(), &signature)
            .await
            .unwrap();

        assert_eq!(event.event_type, WebhookEventType::CheckoutSessionCompleted);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_malformed_header() {
        let adapter = StripePaymentAdapter::new(test_config());
        let result = adapter
            .verify_webhook(br#"{"id":"evt_test"}"#, "malformed_header")
            .await;

        assert_eq!(result.unwrap_err().code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_invalid_json() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = "not valid json";
        let timestamp = chrono::Utc::now().timestamp();
        let signature = create_test_signature("whsec_test_secret", timestamp, payload);

        let err = adapter
            .verify_webhook(payload.as_bytes(), &signature)
            .await
            .unwrap_err();

        assert!(err.message.contains("Invalid JSON"));
    }
}
