//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    pub stripe_api_key: String,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: String,

    /// Where Stripe sends the buyer after paying
    pub success_url: String,

    /// Where Stripe sends the buyer after abandoning checkout
    pub cancel_url: String,

    /// Product-to-price map as `product=price_id` pairs, comma-separated
    pub prices: Option<String>,

    /// Use an unmapped product ref as the Stripe price ID
    #[serde(default)]
    pub price_passthrough: bool,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_live_")
    }

    /// Parsed `(product_ref, price_id)` pairs.
    pub fn price_map(&self) -> Result<Vec<(String, String)>, ValidationError> {
        let Some(raw) = self.prices.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once('=') {
                Some((product, price))
                    if !product.trim().is_empty() && !price.trim().is_empty() =>
                {
                    Ok((product.trim().to_string(), price.trim().to_string()))
                }
                _ => Err(ValidationError::InvalidPriceMap(entry.to_string())),
            })
            .collect()
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if !is_http_url(&self.success_url) {
            return Err(ValidationError::InvalidRedirectUrl("success_url"));
        }
        if !is_http_url(&self.cancel_url) {
            return Err(ValidationError::InvalidRedirectUrl("cancel_url"));
        }

        self.price_map()?;
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PaymentConfig {
        PaymentConfig {
            stripe_api_key: "sk_test_abcd1234".to_string(),
            stripe_webhook_secret: "whsec_xyz789".to_string(),
            success_url: "https://shop.example/checkout/success".to_string(),
            cancel_url: "https://shop.example/cart".to_string(),
            prices: Some("racket-pro=price_racket, grip=price_grip".to_string()),
            price_passthrough: false,
        }
    }

    #[test]
    fn test_is_test_mode() {
        let config = valid();
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_is_live_mode() {
        let config = PaymentConfig {
            stripe_api_key: "sk_live_xxx".to_string(),
            ..valid()
        };
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = PaymentConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_api_key_prefix() {
        let config = PaymentConfig {
            stripe_api_key: "pk_test_xxx".to_string(), // publishable key
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidStripeKey)
        ));
    }

    #[test]
    fn test_validation_invalid_webhook_secret_prefix() {
        let config = PaymentConfig {
            stripe_webhook_secret: "secret_xxx".to_string(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_requires_redirect_urls() {
        let config = PaymentConfig {
            cancel_url: String::new(),
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRedirectUrl("cancel_url"))
        ));
    }

    #[test]
    fn test_price_map_parsing() {
        let pairs = valid().price_map().unwrap();
        assert_eq!(
            pairs,
            vec![
                ("racket-pro".to_string(), "price_racket".to_string()),
                ("grip".to_string(), "price_grip".to_string()),
            ]
        );
    }

    #[test]
    fn test_price_map_rejects_malformed_entry() {
        let config = PaymentConfig {
            prices: Some("racket-pro=price_racket,grip".to_string()),
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPriceMap(entry)) if entry == "grip"
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }
}
