//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, events, errors)
//! - `cart` - Cart aggregate and variant key derivation
//! - `checkout` - Payment line items and checkout errors
//! - `registration` - Passes, tournaments and registration lifecycle

pub mod cart;
pub mod checkout;
pub mod foundation;
pub mod registration;
