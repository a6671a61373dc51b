/// Middleware module
///
/// Bearer-token session checking for protected routes.

mod session_middleware;

pub use session_middleware::{bearer_token, SessionMiddleware};
