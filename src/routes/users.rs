use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::store::User;

/// Public user fields; the password hash never leaves the server
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

/// GET /users/me
///
/// **Requires** `Authorization: Bearer <access_token>`; the user is
/// resolved by `SessionMiddleware`.
pub async fn get_current_user(user: web::ReqData<User>) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(&*user))
}

/// GET /users
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state.accounts.list_all().await?;

    Ok(HttpResponse::Ok().json(UserListResponse {
        users: users.iter().map(UserResponse::from).collect(),
    }))
}
