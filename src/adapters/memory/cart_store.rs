//! In-memory CartStore keyed by session.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::cart::Cart;
use crate::domain::foundation::{CartSessionId, DomainError};
use crate::ports::CartStore;

/// In-memory cart store. Carts never expire.
#[derive(Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<CartSessionId, Cart>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions holding a stored cart.
    pub async fn session_count(&self) -> usize {
        self.carts.read().await.len()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn load(&self, session: &CartSessionId) -> Result<Cart, DomainError> {
        Ok(self
            .carts
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, session: &CartSessionId, cart: &Cart) -> Result<(), DomainError> {
        self.carts.write().await.insert(*session, cart.clone());
        Ok(())
    }

    async fn clear(&self, session: &CartSessionId) -> Result<(), DomainError> {
        self.carts.write().await.remove(session);
        Ok(())
    }
}
