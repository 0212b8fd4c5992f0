use actix_web::HttpResponse;

/// `GET /health_check`
///
/// Never touches the store, so it stays green even when the store
/// configuration is missing.
pub async fn health_check() -> HttpResponse { HttpResponse::Ok().finish() }
