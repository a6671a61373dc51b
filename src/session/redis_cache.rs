use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;

use super::{session_key, SessionCache};
use crate::error::AppError;

/// Redis-backed session cache.
///
/// Holds one `ConnectionManager` opened at startup; clones share the same
/// multiplexed connection. Every Redis failure surfaces as
/// `CacheError::Unavailable`, there is no fallback.
#[derive(Clone)]
pub struct RedisSessionCache {
    connection: ConnectionManager,
}

impl RedisSessionCache {
    /// Connects to `url` (e.g. `redis://127.0.0.1:6379`).
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl SessionCache for RedisSessionCache {
    async fn set(&self, email: &str, token: &str, ttl: Duration) -> Result<(), AppError> {
        let mut connection = self.connection.clone();
        // EX rejects 0
        let seconds = ttl.as_secs().max(1);

        redis::cmd("SET")
            .arg(session_key(email))
            .arg(token)
            .arg("EX")
            .arg(seconds)
            .query_async::<_, ()>(&mut connection)
            .await?;

        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<String>, AppError> {
        let mut connection = self.connection.clone();

        let token = redis::cmd("GET")
            .arg(session_key(email))
            .query_async::<_, Option<String>>(&mut connection)
            .await?;

        Ok(token)
    }
}
