//! Checkout domain module.
//!
//! Price references, payment line items and checkout errors.

mod errors;
mod price;

pub use errors::CheckoutError;
pub use price::{
    PriceRef, PricedLineItem, CART_SESSION_METADATA, CUSTOMIZATION_METADATA,
    VARIANT_KEY_METADATA,
};
