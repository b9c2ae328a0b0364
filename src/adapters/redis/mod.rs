//! Redis adapters.

mod cart_store;

pub use cart_store::{RedisCartStore, DEFAULT_CART_KEY_PREFIX};
