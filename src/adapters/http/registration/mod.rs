//! HTTP adapter for tournament registration.
//!
//! Requires `X-User-Id`.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::registration_routes;
