use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AccountStore, NewUser, User};
use crate::error::{AccountError, AppError};

/// In-process account store with the same uniqueness rules as the
/// Postgres schema. Ids start at 1 and increase monotonically.
#[derive(Default)]
pub struct InMemoryAccountStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        // Write lock held across check and insert
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AccountError::DuplicateEmail.into());
        }
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(AccountError::DuplicateUsername.into());
        }

        let id = users.last().map(|u| u.id + 1).unwrap_or(1);
        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().await.clone())
    }
}
