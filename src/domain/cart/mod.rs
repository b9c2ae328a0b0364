//! Cart domain module.
//!
//! Aggregates a shopper's selections into canonical lines keyed by
//! product and customization.
//!
//! # Module Structure
//!
//! - `variant_key` - Line identity derivation
//! - `line` - CartLine value type and quantity bounds
//! - `aggregate` - Cart aggregate and `normalize`
//! - `errors` - CartError

mod aggregate;
mod errors;
mod line;
mod variant_key;

pub use aggregate::{normalize, Cart};
pub use errors::CartError;
pub use line::{CartLine, MAX_LINE_QUANTITY, MIN_LINE_QUANTITY};
pub use variant_key::{derive_key, Customization, VariantKey, MAX_COLOR_SLOTS, RANDOM_COLOR};
