//! Cart aggregate - merges line additions into a canonical cart.
//!
//! # Invariants
//!
//! - No two lines share a variant key
//! - Every line quantity is within `[MIN_LINE_QUANTITY, MAX_LINE_QUANTITY]`
//! - Lines with a blank product reference never survive hydration
//!
//! A cart is owned by a single shopper session, so it carries no locking.

use serde::{Deserialize, Serialize};

use super::line::{clamp_quantity, CartLine, MAX_LINE_QUANTITY, MIN_LINE_QUANTITY};
use super::variant_key::{derive_key, Customization, VariantKey};
use crate::domain::foundation::{ProductRef, ValidationError};

/// A shopper's cart.
///
/// Deserialization goes through [`normalize`], so a cart hydrated from an
/// untrusted blob always satisfies the invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates a cart from lines of unknown provenance.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self {
            lines: normalize(lines),
        }
    }

    /// Adds `quantity` units of a product variant.
    ///
    /// Increments the existing line with the same variant key or appends a
    /// new one. The resulting quantity is capped at `MAX_LINE_QUANTITY`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfRange` when `quantity` is zero.
    pub fn add_line(
        &mut self,
        product_ref: ProductRef,
        customization: Option<Customization>,
        quantity: u32,
    ) -> Result<&CartLine, ValidationError> {
        if quantity < MIN_LINE_QUANTITY {
            return Err(ValidationError::out_of_range(
                "quantity",
                i64::from(MIN_LINE_QUANTITY),
                i64::from(MAX_LINE_QUANTITY),
                i64::from(quantity),
            ));
        }

        let key = derive_key(&product_ref, customization.as_ref());
        let index = match self.position(&key) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = clamp_quantity(u64::from(line.quantity) + u64::from(quantity));
                index
            }
            None => {
                self.lines.push(CartLine::new(product_ref, customization, quantity));
                self.lines.len() - 1
            }
        };

        Ok(&self.lines[index])
    }

    /// Sets a line's quantity outright. Zero removes the line.
    ///
    /// Returns `false` when no line has the given key.
    pub fn set_quantity(&mut self, key: &VariantKey, quantity: u32) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };

        if quantity == 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity = clamp_quantity(u64::from(quantity));
        }
        true
    }

    /// Removes a line. Equivalent to `set_quantity(key, 0)`.
    pub fn remove_line(&mut self, key: &VariantKey) -> bool {
        self.set_quantity(key, 0)
    }

    /// Empties the cart. Safe on a cart that was never hydrated.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the line with the given key.
    pub fn get(&self, key: &VariantKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.variant_key == key)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    fn position(&self, key: &VariantKey) -> Option<usize> {
        self.lines.iter().position(|line| &line.variant_key == key)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

/// Collapses lines into canonical form.
///
/// - drops lines whose product reference is blank or whose quantity is zero
/// - re-derives every variant key from product and customization
/// - merges lines sharing a key (summed, then capped), keeping first-seen order
///
/// `normalize(normalize(x)) == normalize(x)` for every input.
pub fn normalize(lines: impl IntoIterator<Item = CartLine>) -> Vec<CartLine> {
    let mut canonical: Vec<CartLine> = Vec::new();

    for line in lines {
        if line.product_ref.is_blank() || line.quantity == 0 {
            continue;
        }

        let rebuilt = CartLine::new(line.product_ref, line.customization, line.quantity);
        match canonical
            .iter_mut()
            .find(|existing| existing.variant_key == rebuilt.variant_key)
        {
            Some(existing) => {
                existing.quantity =
                    clamp_quantity(u64::from(existing.quantity) + u64::from(rebuilt.quantity));
            }
            None => canonical.push(rebuilt),
        }
    }

    canonical
}
