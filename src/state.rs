//! Handles shared by every request.

use std::sync::Arc;

use crate::auth::{CredentialVerifier, TokenIssuer};
use crate::session::SessionCache;
use crate::store::AccountStore;

/// Dependencies injected into the login flow and the session guard.
///
/// Built once at startup and handed to actix as `web::Data<AppState>`;
/// the store and cache are trait objects so tests can swap in the
/// in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub sessions: Arc<dyn SessionCache>,
    pub tokens: TokenIssuer,
    pub credentials: CredentialVerifier,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        sessions: Arc<dyn SessionCache>,
        tokens: TokenIssuer,
        credentials: CredentialVerifier,
    ) -> Self {
        Self {
            accounts,
            sessions,
            tokens,
            credentials,
        }
    }
}
