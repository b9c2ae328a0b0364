//! Redis-backed CartStore.
//!
//! Each session's cart is a JSON array of lines stored under
//! `{prefix}:{session_id}` with a sliding TTL refreshed on every save.
//! Blobs are treated as untrusted on load: unreadable lines are skipped
//! and the rest go through `Cart::from_lines`.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::cart::{Cart, CartLine};
use crate::domain::foundation::{CartSessionId, DomainError, ErrorCode};
use crate::ports::CartStore;

/// Default key prefix for cart blobs.
pub const DEFAULT_CART_KEY_PREFIX: &str = "courtpass:cart";

/// Redis cart store shared across server instances.
#[derive(Clone)]
pub struct RedisCartStore {
    conn: MultiplexedConnection,
    key_prefix: String,
    ttl_secs: u64,
}

impl RedisCartStore {
    pub fn new(conn: MultiplexedConnection, ttl_secs: u64) -> Self {
        Self {
            conn,
            key_prefix: DEFAULT_CART_KEY_PREFIX.to_string(),
            ttl_secs,
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn key(&self, session: &CartSessionId) -> String {
        cart_key(&self.key_prefix, session)
    }
}

fn cart_key(prefix: &str, session: &CartSessionId) -> String {
    format!("{}:{}", prefix, session)
}

fn storage_error(op: &str, e: redis::RedisError) -> DomainError {
    DomainError::new(ErrorCode::CartStorageFailed, format!("Redis {} failed: {}", op, e))
}

/// Decodes a stored blob, skipping lines that do not parse.
fn decode_cart(session: &CartSessionId, blob: &str) -> Cart {
    let values: Vec<serde_json::Value> = match serde_json::from_str(blob) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(
                session_id = %session,
                error = %e,
                "Discarding unreadable cart blob"
            );
            return Cart::new();
        }
    };

    let lines = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<CartLine>(value) {
            Ok(line) => Some(line),
            Err(e) => {
                tracing::warn!(
                    session_id = %session,
                    index,
                    error = %e,
                    "Skipping malformed cart line"
                );
                None
            }
        })
        .collect();

    Cart::from_lines(lines)
}

#[async_trait]
impl CartStore for RedisCartStore {
    async fn load(&self, session: &CartSessionId) -> Result<Cart, DomainError> {
        let mut conn = self.conn.clone();
        let blob: Option<String> = conn
            .get(self.key(session))
            .await
            .map_err(|e| storage_error("GET", e))?;

        Ok(blob
            .map(|b| decode_cart(session, &b))
            .unwrap_or_default())
    }

    async fn save(&self, session: &CartSessionId, cart: &Cart) -> Result<(), DomainError> {
        if cart.is_empty() {
            return self.clear(session).await;
        }

        let blob = serde_json::to_string(cart).map_err(|e| {
            DomainError::new(ErrorCode::CartStorageFailed, format!("Failed to encode cart: {}", e))
        })?;

        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(self.key(session))
            .arg(blob)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| storage_error("SET", e))?;

        tracing::debug!(session_id = %session, lines = cart.len(), "Cart saved");
        Ok(())
    }

    async fn clear(&self, session: &CartSessionId) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.key(session))
            .await
            .map_err(|e| storage_error("DEL", e))?;
        Ok(())
    }
}
