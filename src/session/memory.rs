use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::{session_key, SessionCache};
use crate::error::AppError;

/// In-process session cache with per-entry deadlines.
///
/// Expired entries read as absent and are dropped on the next write to the
/// same key; there is no background sweeper.
#[derive(Default)]
pub struct InMemorySessionCache {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl InMemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionCache for InMemorySessionCache {
    async fn set(&self, email: &str, token: &str, ttl: Duration) -> Result<(), AppError> {
        let deadline = Instant::now() + ttl;
        self.entries
            .write()
            .await
            .insert(session_key(email), (token.to_string(), deadline));
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<String>, AppError> {
        let entries = self.entries.read().await;
        let token = entries
            .get(&session_key(email))
            .filter(|(_, deadline)| Instant::now() < *deadline)
            .map(|(token, _)| token.clone());
        Ok(token)
    }
}
