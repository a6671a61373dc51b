/// Session Authentication Middleware
///
/// Runs the session guard for every request it wraps and injects the
/// resolved `User` into request extensions, where handlers pick it up via
/// `web::ReqData<User>`.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::authenticate;
use crate::error::AppError;
use crate::state::AppState;

/// Extracts the token from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively; a missing header, another
/// scheme or an empty token yields `None`.
pub fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

/// Protects routes with the bearer-token session check
pub struct SessionMiddleware {
    state: web::Data<AppState>,
}

impl SessionMiddleware {
    pub fn new(state: web::Data<AppState>) -> Self {
        Self { state }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            state: self.state.clone(),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    state: web::Data<AppState>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let state = self.state.clone();

        Box::pin(async move {
            let token = match bearer_token(&req) {
                Some(token) => token,
                None => {
                    tracing::debug!("Missing or malformed Authorization header");
                    return Err(AppError::unauthenticated().into());
                }
            };

            let user = authenticate(state.get_ref(), &token).await?;

            tracing::debug!(user_id = user.id, "Request authenticated");
            req.extensions_mut().insert(user);

            service.call(req).await
        })
    }
}
