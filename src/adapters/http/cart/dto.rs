//! DTOs for cart endpoints.
//!
//! Request bodies are deliberately loose; they are coerced into typed
//! commands here so handlers only ever see valid values.

use serde::{Deserialize, Serialize};

use crate::domain::cart::{Cart, CartLine, Customization, MAX_COLOR_SLOTS, MAX_LINE_QUANTITY};
use crate::domain::foundation::{ProductRef, ValidationError};

/// Request to add a product (or a customized variant of it).
#[derive(Debug, Clone, Deserialize)]
pub struct AddLineRequest {
    pub product_ref: String,

    /// Units to add; defaults to 1.
    #[serde(default)]
    pub quantity: Option<i64>,

    /// Chosen colors per slot; `null` or blank entries become random.
    #[serde(default)]
    pub colors: Option<Vec<Option<String>>>,

    /// Number of color slots the product has. When set, missing choices
    /// are filled with random.
    #[serde(default)]
    pub slots: Option<usize>,
}

impl AddLineRequest {
    pub fn product_ref(&self) -> Result<ProductRef, ValidationError> {
        ProductRef::new(self.product_ref.as_str())
    }

    /// Units to add, rejecting non-positive values.
    pub fn quantity(&self) -> Result<u32, ValidationError> {
        match self.quantity {
            None => Ok(1),
            Some(q) if q < 1 => Err(ValidationError::out_of_range(
                "quantity",
                1,
                i64::from(MAX_LINE_QUANTITY),
                q,
            )),
            Some(q) => Ok(u32::try_from(q).unwrap_or(u32::MAX)),
        }
    }

    /// Customization built from `colors` and `slots`, rejecting more than
    /// `MAX_COLOR_SLOTS` of either.
    pub fn customization(&self) -> Result<Option<Customization>, ValidationError> {
        let color_count = self.colors.as_ref().map_or(0, Vec::len);
        check_slot_count("colors", color_count)?;
        if let Some(slots) = self.slots {
            check_slot_count("slots", slots)?;
        }

        let chosen: Vec<Option<&str>> = self
            .colors
            .as_ref()
            .map(|colors| colors.iter().map(|c| c.as_deref()).collect())
            .unwrap_or_default();

        Ok(match self.slots {
            Some(slots) => Some(Customization::with_slots(slots, &chosen)),
            None if self.colors.is_some() => Some(Customization::colors(
                chosen.into_iter().map(|c| c.unwrap_or_default()),
            )),
            None => None,
        })
    }
}

fn check_slot_count(field: &str, count: usize) -> Result<(), ValidationError> {
    if count > MAX_COLOR_SLOTS {
        return Err(ValidationError::out_of_range(
            field,
            0,
            MAX_COLOR_SLOTS as i64,
            i64::try_from(count).unwrap_or(i64::MAX),
        ));
    }
    Ok(())
}

/// Request to set a line's quantity. Zero (or less) removes the line.
#[derive(Debug, Clone, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

impl SetQuantityRequest {
    pub fn quantity(&self) -> u32 {
        u32::try_from(self.quantity.max(0)).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineResponse {
    pub variant_key: String,
    pub product_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    pub quantity: u32,
}

impl From<&CartLine> for CartLineResponse {
    fn from(line: &CartLine) -> Self {
        Self {
            variant_key: line.variant_key.to_string(),
            product_ref: line.product_ref.to_string(),
            colors: line.customization.as_ref().map(|c| c.colors.clone()),
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_quantity: u32,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineResponse::from).collect(),
            total_quantity: cart.total_quantity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetQuantityResponse {
    pub updated: bool,
    pub cart: CartResponse,
}
