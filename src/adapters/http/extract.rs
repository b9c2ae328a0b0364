//! Request context extractors.
//!
//! Identity is asserted by the upstream auth proxy through `X-User-Id`;
//! the storefront keeps its cart under `X-Cart-Session`.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::foundation::{CartSessionId, UserId, ValidationError};

use super::error::ApiError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const CART_SESSION_HEADER: &str = "X-Cart-Session";

/// Authenticated user taken from `X-User-Id`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::new(s).ok())
            .ok_or(ApiError::AuthenticationRequired)?;

        Ok(AuthenticatedUser { user_id })
    }
}

/// Cart session taken from `X-Cart-Session`.
#[derive(Debug, Clone, Copy)]
pub struct CartSession(pub CartSessionId);

#[async_trait]
impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CART_SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ValidationError::empty_field(CART_SESSION_HEADER))?;

        Ok(CartSession(CartSessionId::parse(raw.trim())?))
    }
}
