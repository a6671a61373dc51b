use actix_web::HttpResponse;

/// Liveness probe. Does not touch the account store or the session cache.
pub async fn health_check() -> HttpResponse {
    tracing::debug!("Health check endpoint called");
    HttpResponse::Ok().finish()
}
