//! In-memory adapters for tests and database-less local runs.

mod cart_store;
mod registration_store;

pub use cart_store::InMemoryCartStore;
pub use registration_store::InMemoryRegistrationStore;
