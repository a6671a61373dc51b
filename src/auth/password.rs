/// Password Hashing and Verification
///
/// bcrypt (salted, one-way) with a configurable work factor.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::{AppError, ValidationError};
use crate::validators::MAX_PASSWORD_BYTES;

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

#[derive(Debug, Clone, Copy)]
pub struct CredentialVerifier {
    cost: u32,
}

impl Default for CredentialVerifier {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl CredentialVerifier {
    /// `cost` is the bcrypt work factor (4..=31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns a validation error for passwords longer than bcrypt reads,
    /// and an internal error if bcrypt rejects the cost or fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        if password.len() > MAX_PASSWORD_BYTES {
            let err = ValidationError::TooLong("password".to_string(), MAX_PASSWORD_BYTES);
            return Err(err.into());
        }
        hash(password, self.cost)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against a stored hash
    ///
    /// # Errors
    /// Returns an internal error if the stored hash is malformed; a wrong
    /// password is `Ok(false)`. Input past bcrypt's 72-byte window can never
    /// match a stored hash, so it is `Ok(false)` without hashing.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        verify(password, hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
    }
}
