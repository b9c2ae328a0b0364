//! GetCartHandler - Query handler for a session's current cart.

use std::sync::Arc;

use crate::domain::cart::{Cart, CartError};
use crate::domain::foundation::CartSessionId;
use crate::ports::CartStore;

#[derive(Debug, Clone)]
pub struct GetCartQuery {
    pub session: CartSessionId,
}

pub struct GetCartHandler {
    cart_store: Arc<dyn CartStore>,
}

impl GetCartHandler {
    pub fn new(cart_store: Arc<dyn CartStore>) -> Self {
        Self { cart_store }
    }

    pub async fn handle(&self, query: GetCartQuery) -> Result<Cart, CartError> {
        Ok(self.cart_store.load(&query.session).await?)
    }
}
