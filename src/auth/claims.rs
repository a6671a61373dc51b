/// JWT Claims structure
///
/// Payload of an access token: the subject (user email), standard
/// timestamps and the issuer (RFC 7519).

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject (user email). Optional on the wire so that a token signed
    /// without one decodes and is then rejected by the session check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
    /// Token ID; keeps two tokens minted in the same second distinct
    #[serde(default)]
    pub jti: String,
}

impl Claims {
    /// Create claims for `email` expiring `expiry_seconds` from now
    pub fn new(email: String, expiry_seconds: i64, issuer: String) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: Some(email),
            exp: now + expiry_seconds,
            iat: now,
            iss: issuer,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Subject email, if present and non-empty
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }
}
