/// Login flow
///
/// Account lookup, password check, token issuance, then the session cache
/// write. Each step either succeeds or ends the flow; the cache is only
/// written after authentication succeeded, so a failed login never
/// disturbs an existing session.

use serde::Serialize;
use std::time::Duration;

use crate::error::AppError;
use crate::state::AppState;

/// Successful login response body
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Authenticate `email`/`password` and open a new session.
///
/// An unknown email and a wrong password produce the same
/// `AuthError::InvalidCredentials`.
///
/// # Errors
/// - `AuthError::InvalidCredentials` on either credential mismatch
/// - `StoreError` / `CacheError` when a dependency fails
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<AccessToken, AppError> {
    let user = state
        .accounts
        .find_by_email(email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !state.credentials.verify(password, &user.password_hash)? {
        return Err(AppError::invalid_credentials());
    }

    let issued = state.tokens.issue(&user.email)?;

    // Last writer wins: a concurrent login for the same user simply replaces this entry
    let ttl = Duration::from_secs(issued.expires_in.max(0) as u64);
    state.sessions.set(&user.email, &issued.token, ttl).await?;

    tracing::debug!(user_id = user.id, "Session stored");

    Ok(AccessToken {
        access_token: issued.token,
        token_type: "bearer".to_string(),
        expires_in: issued.expires_in,
    })
}
