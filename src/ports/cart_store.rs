//! Cart store port.
//!
//! Persists one cart blob per shopper session.

use async_trait::async_trait;

use crate::domain::cart::Cart;
use crate::domain::foundation::{CartSessionId, DomainError};

/// Port for per-session cart persistence.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Loads the cart for a session. A session with no stored cart yields
    /// an empty cart, never an error.
    async fn load(&self, session: &CartSessionId) -> Result<Cart, DomainError>;

    /// Replaces the stored cart for a session.
    async fn save(&self, session: &CartSessionId, cart: &Cart) -> Result<(), DomainError>;

    /// Removes the stored cart. Idempotent.
    async fn clear(&self, session: &CartSessionId) -> Result<(), DomainError>;
}
