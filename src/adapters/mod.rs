//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Config-backed price catalog
//! - `http` - Axum REST API
//! - `memory` - In-memory stores for tests and local runs
//! - `notification` - Chat webhook and log notifiers
//! - `postgres` - Registration store on PostgreSQL
//! - `redis` - Cart store on Redis
//! - `stripe` - Stripe checkout sessions and webhook verification

pub mod catalog;
pub mod http;
pub mod memory;
pub mod notification;
pub mod postgres;
pub mod redis;
pub mod stripe;
