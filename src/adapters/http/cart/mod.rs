//! HTTP adapter for cart endpoints.
//!
//! Every route requires the `X-Cart-Session` header.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::cart_routes;
