use async_trait::async_trait;
use sqlx::PgPool;

use super::{AccountStore, NewUser, User};
use crate::error::{AccountError, AppError};

const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed account store sharing the process-wide connection pool.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, column_query: &str, value: &str) -> Result<bool, AppError> {
        let found = sqlx::query_scalar::<_, i64>(column_query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}

/// Maps a unique-constraint violation that slipped past the pre-check
/// (two concurrent registrations) onto the matching account error.
fn map_insert_error(err: sqlx::Error) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return match db_err.constraint() {
                Some("users_username_key") => AccountError::DuplicateUsername.into(),
                _ => AccountError::DuplicateEmail.into(),
            };
        }
    }
    err.into()
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        if self
            .exists("SELECT id FROM users WHERE email = $1", &new_user.email)
            .await?
        {
            return Err(AccountError::DuplicateEmail.into());
        }

        if self
            .exists("SELECT id FROM users WHERE username = $1", &new_user.username)
            .await?
        {
            return Err(AccountError::DuplicateUsername.into());
        }

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
