/// Access token issuance and decoding
///
/// Tokens are HS256 JWTs carrying the user's email as subject. Decoding is
/// total: a bad signature, malformed input, wrong issuer or an elapsed
/// expiry all come back as `None`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::configuration::JwtSettings;
use crate::error::AppError;

/// A freshly signed access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Lifetime in seconds; also the session cache TTL
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    lifetime_seconds: i64,
}

impl TokenIssuer {
    pub fn new(config: &JwtSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            lifetime_seconds: config.access_token_expiry,
        }
    }

    pub fn lifetime_seconds(&self) -> i64 {
        self.lifetime_seconds
    }

    /// Sign a token for `email` expiring `lifetime_seconds` from now
    ///
    /// # Errors
    /// Returns an internal error if signing fails
    pub fn issue(&self, email: &str) -> Result<IssuedToken, AppError> {
        let claims = Claims::new(email.to_string(), self.lifetime_seconds, self.issuer.clone());

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in: self.lifetime_seconds,
        })
    }

    /// Verify signature, issuer and expiry and return the claims
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("Access token rejected: {}", e);
                None
            }
        }
    }
}
