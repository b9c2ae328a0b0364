//! ClearCartHandler - Empties a session's cart.

use std::sync::Arc;

use crate::domain::cart::CartError;
use crate::domain::foundation::CartSessionId;
use crate::ports::CartStore;

#[derive(Debug, Clone)]
pub struct ClearCartCommand {
    pub session: CartSessionId,
}

pub struct ClearCartHandler {
    cart_store: Arc<dyn CartStore>,
}

impl ClearCartHandler {
    pub fn new(cart_store: Arc<dyn CartStore>) -> Self {
        Self { cart_store }
    }

    /// Safe on a session that never stored a cart.
    pub async fn handle(&self, cmd: ClearCartCommand) -> Result<(), CartError> {
        self.cart_store.clear(&cmd.session).await?;
        tracing::debug!(session_id = %cmd.session, "Cart cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCartStore;

    #[tokio::test]
    async fn clearing_unknown_session_succeeds() {
        let handler = ClearCartHandler::new(Arc::new(InMemoryCartStore::new()));
        let result = handler
            .handle(ClearCartCommand {
                session: CartSessionId::new(),
            })
            .await;
        assert!(result.is_ok());
    }
}
