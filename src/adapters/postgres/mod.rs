//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresRegistrationStore` - Tournaments, passes and the atomic
//!   consume-and-register transaction

mod registration_store;

pub use registration_store::PostgresRegistrationStore;
