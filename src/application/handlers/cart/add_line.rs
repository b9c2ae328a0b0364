//! AddCartLineHandler - Adds units of a product variant to a session's cart.

use std::sync::Arc;

use crate::domain::cart::{Cart, CartError, CartLine, Customization};
use crate::domain::foundation::{CartSessionId, ProductRef};
use crate::ports::CartStore;

/// Command to add a line (or more units of an existing line).
#[derive(Debug, Clone)]
pub struct AddCartLineCommand {
    pub session: CartSessionId,
    pub product_ref: ProductRef,
    pub customization: Option<Customization>,
    pub quantity: u32,
}

/// Result of adding a line.
#[derive(Debug, Clone)]
pub struct AddCartLineResult {
    /// The line as it stands after the add (quantity possibly capped).
    pub line: CartLine,
    pub cart: Cart,
}

pub struct AddCartLineHandler {
    cart_store: Arc<dyn CartStore>,
}

impl AddCartLineHandler {
    pub fn new(cart_store: Arc<dyn CartStore>) -> Self {
        Self { cart_store }
    }

    pub async fn handle(&self, cmd: AddCartLineCommand) -> Result<AddCartLineResult, CartError> {
        let mut cart = self.cart_store.load(&cmd.session).await?;

        let line = cart
            .add_line(cmd.product_ref, cmd.customization, cmd.quantity)?
            .clone();

        self.cart_store.save(&cmd.session, &cart).await?;

        tracing::debug!(
            session_id = %cmd.session,
            variant_key = %line.variant_key,
            quantity = line.quantity,
            "Cart line added"
        );

        Ok(AddCartLineResult { line, cart })
    }
}
