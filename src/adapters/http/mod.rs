//! HTTP adapters - REST API implementations.
//!
//! Each area has its own dto/handlers/routes; `router` assembles them
//! under `/api`.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod extract;
pub mod registration;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use extract::{AuthenticatedUser, CartSession, CART_SESSION_HEADER, USER_ID_HEADER};
pub use router::api_router;
pub use state::AppState;
