/// Authentication module
///
/// Token issuance/decoding, password hashing, registration, the login
/// flow and the per-request session guard.

mod claims;
mod guard;
mod jwt;
mod login;
mod password;
mod registration;

pub use claims::Claims;
pub use guard::{authenticate, AuthStage};
pub use jwt::{IssuedToken, TokenIssuer};
pub use login::{login, AccessToken};
pub use password::{CredentialVerifier, MAX_COST, MIN_COST};
pub use registration::register;
