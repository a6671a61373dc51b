mod auth;
mod health_check;
mod users;

pub use auth::{login, register};
pub use health_check::health_check;
pub use users::{get_current_user, list_users, UserListResponse, UserResponse};
