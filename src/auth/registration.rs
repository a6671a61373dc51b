/// Account registration
///
/// Validates input, hashes the password and creates the account. The
/// duplicate-email check lives in the account store so it also covers
/// concurrent registrations.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{NewUser, User};
use crate::validators::{is_valid_email, is_valid_password, is_valid_username};

/// # Errors
/// - `ValidationError` for malformed email, username or password
/// - `AccountError::DuplicateEmail` / `DuplicateUsername`
/// - `StoreError` when the account store fails
pub async fn register(
    state: &AppState,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let email = is_valid_email(email)?;
    let username = is_valid_username(username)?;
    is_valid_password(password)?;

    let password_hash = state.credentials.hash(password)?;

    state
        .accounts
        .create(NewUser {
            username,
            email,
            password_hash,
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_support::test_state;
    use crate::error::AccountError;

    #[tokio::test]
    async fn test_register_stores_hashed_password() {
        let state = test_state();
        let user = register(&state, "alice", " alice@example.com ", "pw1").await.unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.password_hash, "pw1");
        assert!(state.credentials.verify("pw1", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_twice_is_duplicate_email() {
        let state = test_state();
        register(&state, "alice", "alice@example.com", "pw1").await.unwrap();

        let err = register(&state, "alice-again", "alice@example.com", "pw2")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Account(AccountError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let state = test_state();

        assert!(matches!(
            register(&state, "alice", "not-an-email", "pw1").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            register(&state, "", "alice@example.com", "pw1").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            register(&state, "alice", "alice@example.com", "").await,
            Err(AppError::Validation(_))
        ));
        assert!(state.accounts.list_all().await.unwrap().is_empty());
    }
}
