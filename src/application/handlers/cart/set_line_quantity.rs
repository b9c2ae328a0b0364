//! SetLineQuantityHandler - Sets or removes a cart line by variant key.

use std::sync::Arc;

use crate::domain::cart::{Cart, CartError, VariantKey};
use crate::domain::foundation::CartSessionId;
use crate::ports::CartStore;

/// Command to set a line's quantity. Zero removes the line.
#[derive(Debug, Clone)]
pub struct SetLineQuantityCommand {
    pub session: CartSessionId,
    pub variant_key: VariantKey,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct SetLineQuantityResult {
    /// False when no line had the key; the cart is then left untouched.
    pub updated: bool,
    pub cart: Cart,
}

pub struct SetLineQuantityHandler {
    cart_store: Arc<dyn CartStore>,
}

impl SetLineQuantityHandler {
    pub fn new(cart_store: Arc<dyn CartStore>) -> Self {
        Self { cart_store }
    }

    pub async fn handle(
        &self,
        cmd: SetLineQuantityCommand,
    ) -> Result<SetLineQuantityResult, CartError> {
        let mut cart = self.cart_store.load(&cmd.session).await?;

        let updated = cart.set_quantity(&cmd.variant_key, cmd.quantity);
        if updated {
            self.cart_store.save(&cmd.session, &cart).await?;
        }

        tracing::debug!(
            session_id = %cmd.session,
            variant_key = %cmd.variant_key,
            quantity = cmd.quantity,
            updated,
            "Cart line quantity set"
        );

        Ok(SetLineQuantityResult { updated, cart })
    }
}
