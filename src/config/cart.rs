//! Cart storage configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct CartConfig {
    /// Idle lifetime of a stored cart, refreshed on every save
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Redis key prefix; keys are `{prefix}:{session_id}`
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl CartConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 {
            return Err(ValidationError::InvalidCartTtl);
        }
        if self.key_prefix.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CART_KEY_PREFIX"));
        }
        Ok(())
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

fn default_key_prefix() -> String {
    "courtpass:cart".to_string()
}
