/// Session guard
///
/// Resolves a presented bearer token to a user. A token is a live session
/// only if it verifies (signature, issuer, expiry) AND the session cache
/// still holds exactly this token for its subject. Every rejection is the
/// same `AuthError::Unauthenticated`; the stage reached is logged at debug
/// level only.
///
/// Store or cache failures are not rejections: they propagate as
/// `StoreError`/`CacheError` so an outage is never reported as a bad token.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::User;

/// Furthest point a token reached in the check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    Presented,
    Decoded,
    CacheMatched,
    Resolved,
}

fn reject(stage: AuthStage, reason: &str) -> AppError {
    tracing::debug!(stage = ?stage, reason = reason, "Session check failed");
    AppError::unauthenticated()
}

pub async fn authenticate(state: &AppState, token: &str) -> Result<User, AppError> {
    let mut stage = AuthStage::Presented;

    let claims = state
        .tokens
        .decode(token)
        .ok_or_else(|| reject(stage, "token did not verify"))?;
    stage = AuthStage::Decoded;

    let email = claims
        .subject()
        .ok_or_else(|| reject(stage, "token has no subject"))?;

    let cached = state
        .sessions
        .get(email)
        .await?
        .ok_or_else(|| reject(stage, "no active session"))?;

    if cached.as_bytes() != token.as_bytes() {
        return Err(reject(stage, "token superseded by a newer session"));
    }
    stage = AuthStage::CacheMatched;

    let user = state
        .accounts
        .find_by_email(email)
        .await?
        .ok_or_else(|| reject(stage, "account no longer exists"))?;
    stage = AuthStage::Resolved;

    tracing::debug!(stage = ?stage, user_id = user.id, "Session check passed");
    Ok(user)
}
