/// Session cache
///
/// Maps `user:<email>:token` to the most recently issued access token.
/// This is authoritative session state, not a read-through cache of the
/// account store: a token is only live while the entry for its subject
/// holds exactly that token. Each login overwrites the entry, so only the
/// newest token per user passes the session check. Entries expire on the
/// cache's own TTL; losing the cache ends every session.

mod memory;
mod redis_cache;

pub use memory::InMemorySessionCache;
pub use redis_cache::RedisSessionCache;

use async_trait::async_trait;
use std::time::Duration;

use crate::error::AppError;

/// Cache key holding the active token for `email`.
pub fn session_key(email: &str) -> String {
    format!("user:{}:token", email)
}

#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Stores `token` as the active session for `email`, replacing any
    /// previous entry and resetting its expiry to `ttl`.
    async fn set(&self, email: &str, token: &str, ttl: Duration) -> Result<(), AppError>;

    /// Returns the active token for `email`, or `None` if absent or expired.
    async fn get(&self, email: &str) -> Result<Option<String>, AppError>;
}
