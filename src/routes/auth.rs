/// Authentication Routes
///
/// Handles user registration and login.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::audit::{AuditLog, AuditLogger};
use crate::auth;
use crate::error::AppError;
use crate::logger::RequestId;
use crate::routes::users::UserResponse;
use crate::state::AppState;

/// User registration request (JSON)
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// OAuth2 password-grant style login form; `username` carries the email
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /register
///
/// Create an account. Returns the public user fields.
///
/// # Errors
/// - 400: Validation errors or email/username already registered
/// - 503: Account store unavailable
pub async fn register(
    body: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
    request_id: RequestId,
) -> Result<HttpResponse, AppError> {
    let user = match auth::register(&state, &body.username, &body.email, &body.password).await {
        Ok(user) => user,
        Err(e) => {
            AuditLogger::log(
                &AuditLog::failure("REGISTER", format!("Registration rejected: {}", e))
                    .with_request_id(request_id.as_str()),
            );
            return Err(e);
        }
    };

    AuditLogger::log(
        &AuditLog::success("REGISTER", "User registered")
            .with_request_id(request_id.as_str())
            .with_user_id(user.id),
    );

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// POST /login
///
/// Form body `username=<email>&password=<password>`. Returns
/// `{access_token, token_type: "bearer", expires_in}` and makes this token
/// the only live session for the user.
///
/// # Errors
/// - 400: Invalid credentials (same response for unknown email and wrong password)
/// - 503: Account store or session cache unavailable
pub async fn login(
    form: web::Form<LoginForm>,
    state: web::Data<AppState>,
    request_id: RequestId,
) -> Result<HttpResponse, AppError> {
    let email = form.username.trim();

    match auth::login(&state, email, &form.password).await {
        Ok(token) => {
            AuditLogger::log(
                &AuditLog::success("LOGIN", "User logged in").with_request_id(request_id.as_str()),
            );
            Ok(HttpResponse::Ok().json(token))
        }
        Err(e) => {
            AuditLogger::log(
                &AuditLog::failure("LOGIN", format!("Login rejected: {}", e))
                    .with_request_id(request_id.as_str()),
            );
            Err(e)
        }
    }
}
