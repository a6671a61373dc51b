/// Account store
///
/// Durable record of registered users. `AccountStore` is the seam the login
/// flow and the session guard depend on; Postgres backs it in production and
/// an in-memory map backs it in tests.

mod memory;
mod postgres;

pub use memory::InMemoryAccountStore;
pub use postgres::PgAccountStore;

use async_trait::async_trait;

use crate::error::AppError;

/// A registered user. Immutable once created.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Fields needed to create a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a user.
    ///
    /// # Errors
    /// - `AccountError::DuplicateEmail` if the email is taken (checked first)
    /// - `AccountError::DuplicateUsername` if the username is taken
    /// - `StoreError` if the backing store fails
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Exact-match lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// All users ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, AppError>;
}
