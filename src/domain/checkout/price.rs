//! Payment-side price references and line items.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::cart::CartLine;

/// Metadata key carrying a line's variant key.
pub const VARIANT_KEY_METADATA: &str = "variant_key";

/// Metadata key carrying a line's customization as JSON.
pub const CUSTOMIZATION_METADATA: &str = "customization";

/// Metadata key carrying the cart session a checkout was created from.
pub const CART_SESSION_METADATA: &str = "cart_session_id";

/// Identifier of a price known to the payment provider (e.g. `price_1Nx...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceRef(String);

impl PriceRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PriceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line of a payment session.
///
/// Maps 1:1 to a cart line; the variant key and customization travel as
/// opaque metadata so fulfillment can reconstruct what was bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLineItem {
    pub price_ref: PriceRef,
    pub quantity: u32,
    pub metadata: BTreeMap<String, String>,
}

impl PricedLineItem {
    /// Builds the payment line for a cart line at the given price.
    pub fn for_line(line: &CartLine, price_ref: PriceRef) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            VARIANT_KEY_METADATA.to_string(),
            line.variant_key.as_str().to_string(),
        );
        if let Some(custom) = &line.customization {
            if let Ok(json) = serde_json::to_string(custom) {
                metadata.insert(CUSTOMIZATION_METADATA.to_string(), json);
            }
        }

        Self {
            price_ref,
            quantity: line.quantity,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::{Cart, Customization};
    use crate::domain::foundation::ProductRef;

    #[test]
    fn line_item_carries_key_and_customization() {
        let mut cart = Cart::new();
        cart.add_line(
            ProductRef::new("grip").unwrap(),
            Some(Customization::colors(["white", "pink"])),
            2,
        )
        .unwrap();

        let item = PricedLineItem::for_line(&cart.lines()[0], PriceRef::new("price_grip"));

        assert_eq!(item.quantity, 2);
        assert_eq!(item.price_ref.as_str(), "price_grip");
        assert_eq!(item.metadata[VARIANT_KEY_METADATA], "grip::white-pink");
        assert_eq!(
            item.metadata[CUSTOMIZATION_METADATA],
            r#"{"colors":["white","pink"]}"#
        );
    }

    #[test]
    fn plain_line_has_no_customization_metadata() {
        let mut cart = Cart::new();
        cart.add_line(ProductRef::new("racket-pro").unwrap(), None, 1)
            .unwrap();

        let item = PricedLineItem::for_line(&cart.lines()[0], PriceRef::new("price_racket"));

        assert!(!item.metadata.contains_key(CUSTOMIZATION_METADATA));
    }
}
