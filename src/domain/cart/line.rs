//! Cart line value type.

use serde::{Deserialize, Serialize};

use super::variant_key::{derive_key, Customization, VariantKey};
use crate::domain::foundation::ProductRef;

/// Smallest quantity a line can hold.
pub const MIN_LINE_QUANTITY: u32 = 1;

/// Largest quantity a line can hold; additions beyond it are capped.
pub const MAX_LINE_QUANTITY: u32 = 20;

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub variant_key: VariantKey,
    pub product_ref: ProductRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
    pub quantity: u32,
}

impl CartLine {
    /// Builds a line with its key derived from product and customization.
    ///
    /// Empty customizations are dropped so the stored payload matches the key.
    pub(crate) fn new(
        product_ref: ProductRef,
        customization: Option<Customization>,
        quantity: u32,
    ) -> Self {
        let customization = customization.filter(|c| !c.is_empty());
        Self {
            variant_key: derive_key(&product_ref, customization.as_ref()),
            product_ref,
            customization,
            quantity: clamp_quantity(u64::from(quantity)),
        }
    }
}

/// Caps a (possibly summed) quantity into `[MIN_LINE_QUANTITY, MAX_LINE_QUANTITY]`.
pub(crate) fn clamp_quantity(quantity: u64) -> u32 {
    quantity.clamp(u64::from(MIN_LINE_QUANTITY), u64::from(MAX_LINE_QUANTITY)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_line_derives_key_and_clamps() {
        let line = CartLine::new(ProductRef::new("shuttle-tube").unwrap(), None, 99);
        assert_eq!(line.variant_key.as_str(), "shuttle-tube");
        assert_eq!(line.quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn line_round_trips_customization_payload() {
        let line = CartLine::new(
            ProductRef::new("grip").unwrap(),
            Some(Customization::colors(["white", "pink"])),
            2,
        );

        let json = serde_json::to_string(&line).unwrap();
        let back: CartLine = serde_json::from_str(&json).unwrap();

        assert_eq!(back, line);
        assert_eq!(back.customization.unwrap().colors, vec!["white", "pink"]);
    }

    #[test]
    fn clamp_quantity_bounds() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(7), 7);
        assert_eq!(clamp_quantity(u64::MAX), 20);
    }
}
