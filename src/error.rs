/// Application error handling
///
/// Every failure in the service funnels into `AppError`:
/// 1. Domain-specific error types (validation, accounts, auth, store, cache)
/// 2. A single HTTP mapping with structured JSON bodies
/// 3. Structured error logging with request context
///
/// Authentication failures are deliberately coarse: every step of the
/// session check collapses into `AuthError::Unauthenticated`.

use actix_web::{error::ResponseError, http::header, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// ============================================================================
/// 1. DOMAIN-SPECIFIC ERROR TYPES
/// ============================================================================

/// Validation errors for registration input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyField(String),
    TooShort(String, usize),
    TooLong(String, usize),
    InvalidFormat(String),
    SuspiciousContent(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} is empty", field),
            ValidationError::TooShort(field, min) => {
                write!(f, "{} is too short (minimum {} characters)", field, min)
            }
            ValidationError::TooLong(field, max) => {
                write!(f, "{} is too long (maximum {} characters)", field, max)
            }
            ValidationError::InvalidFormat(field) => write!(f, "{} has invalid format", field),
            ValidationError::SuspiciousContent(field) => {
                write!(f, "{} contains suspicious content", field)
            }
        }
    }
}

impl StdError for ValidationError {}

/// Account creation conflicts
#[derive(Debug, Clone, PartialEq)]
pub enum AccountError {
    DuplicateEmail,
    DuplicateUsername,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::DuplicateEmail => write!(f, "Email already registered"),
            AccountError::DuplicateUsername => write!(f, "Username already taken"),
        }
    }
}

impl StdError for AccountError {}

/// Authentication errors
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Login failed; never says whether the email or the password was wrong
    InvalidCredentials,
    /// Bearer token rejected at any stage of the session check
    Unauthenticated,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::Unauthenticated => write!(f, "Could not validate credentials"),
        }
    }
}

impl StdError for AuthError {}

/// Account store (Postgres) errors
#[derive(Debug)]
pub enum StoreError {
    Unavailable(String),
    Query(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Account store unavailable: {}", msg),
            StoreError::Query(msg) => write!(f, "Account store query error: {}", msg),
        }
    }
}

impl StdError for StoreError {}

/// Session cache (Redis) errors
#[derive(Debug)]
pub enum CacheError {
    Unavailable(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Unavailable(msg) => write!(f, "Session cache unavailable: {}", msg),
        }
    }
}

impl StdError for CacheError {}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    MissingRequired(String),
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingRequired(msg) => write!(f, "Missing required config: {}", msg),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl StdError for ConfigError {}

/// ============================================================================
/// 2. UNIFIED APPLICATION ERROR TYPE
/// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Account(AccountError),
    Auth(AuthError),
    Store(StoreError),
    Cache(CacheError),
    Config(ConfigError),
    Internal(String),
}

impl AppError {
    pub fn unauthenticated() -> Self {
        AppError::Auth(AuthError::Unauthenticated)
    }

    pub fn invalid_credentials() -> Self {
        AppError::Auth(AuthError::InvalidCredentials)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Account(e) => write!(f, "{}", e),
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Store(e) => write!(f, "{}", e),
            AppError::Cache(e) => write!(f, "{}", e),
            AppError::Config(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

// ============================================================================
// FROM IMPLEMENTATIONS
// ============================================================================

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        AppError::Account(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        AppError::Cache(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => {
                AppError::Store(StoreError::Unavailable(err.to_string()))
            }
            other => AppError::Store(StoreError::Query(other.to_string())),
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Cache(CacheError::Unavailable(err.to_string()))
    }
}

// ============================================================================
// 3. HTTP RESPONSE MAPPING
// ============================================================================

/// Error response structure for HTTP responses
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    /// Id of the failing request, as echoed in `x-request-id`
    pub error_id: String,
    pub message: String,
    /// Error code for client-side handling
    pub code: String,
    pub status: u16,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_id: String, message: String, code: String, status: u16) -> Self {
        Self {
            error_id,
            message,
            code,
            status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Trait for converting errors to HTTP responses with proper logging
pub trait ErrorHandler {
    fn error_response(&self, request_id: &str) -> (StatusCode, ErrorResponse);
    fn log_error(&self, request_id: &str);
}

impl ErrorHandler for AppError {
    fn error_response(&self, request_id: &str) -> (StatusCode, ErrorResponse) {
        let (status, code, message) = match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),

            AppError::Account(e) => match e {
                AccountError::DuplicateEmail => {
                    (StatusCode::BAD_REQUEST, "DUPLICATE_EMAIL", e.to_string())
                }
                AccountError::DuplicateUsername => {
                    (StatusCode::BAD_REQUEST, "DUPLICATE_USERNAME", e.to_string())
                }
            },

            AppError::Auth(e) => match e {
                AuthError::InvalidCredentials => {
                    (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS", e.to_string())
                }
                AuthError::Unauthenticated => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", e.to_string())
                }
            },

            // Never echo driver messages to clients
            AppError::Store(StoreError::Unavailable(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                "Account store temporarily unavailable".to_string(),
            ),
            AppError::Store(StoreError::Query(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                "Account store error occurred".to_string(),
            ),
            AppError::Cache(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CACHE_UNAVAILABLE",
                "Session cache temporarily unavailable".to_string(),
            ),

            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "Server configuration error".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        };

        let error_response = ErrorResponse::new(
            request_id.to_string(),
            message,
            code.to_string(),
            status.as_u16(),
        );

        (status, error_response)
    }

    fn log_error(&self, request_id: &str) {
        match self {
            AppError::Validation(e) => {
                tracing::warn!(request_id = request_id, error = %e, "Validation error");
            }
            AppError::Account(e) => {
                tracing::warn!(request_id = request_id, error = %e, "Duplicate account attempt");
            }
            AppError::Auth(e) => {
                tracing::warn!(request_id = request_id, error = %e, "Authentication error");
            }
            AppError::Store(e) => {
                tracing::error!(request_id = request_id, error = %e, "Account store error");
            }
            AppError::Cache(e) => {
                tracing::error!(request_id = request_id, error = %e, "Session cache error");
            }
            AppError::Config(e) => {
                tracing::error!(request_id = request_id, error = %e, "Configuration error");
            }
            AppError::Internal(msg) => {
                tracing::error!(request_id = request_id, error = %msg, "Internal error");
            }
        }
    }
}

impl AppError {
    /// Renders this error for the request tagged `request_id` and logs it
    /// under the same id.
    pub fn response_for(&self, request_id: &str) -> HttpResponse {
        self.log_error(request_id);
        self.build_response(request_id)
    }

    fn build_response(&self, request_id: &str) -> HttpResponse {
        let (status, error_response) = <Self as ErrorHandler>::error_response(self, request_id);

        let mut builder = HttpResponse::build(status);
        if matches!(self, AppError::Auth(AuthError::Unauthenticated)) {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(error_response)
    }
}

impl ResponseError for AppError {
    // The request logger re-renders this through `response_for` once the
    // request id is known
    fn error_response(&self) -> HttpResponse {
        self.build_response(&uuid::Uuid::new_v4().to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Account(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::InvalidCredentials) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            AppError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(StoreError::Query(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Cache(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
