use actix_web::{HttpResponse, Responder, get};

use crate::models::HealthResponse;

/// # Health Check Endpoint
///
/// Liveness probe with no dependency on the validation pipeline or DNS.
///
/// ## Response
/// - **200 OK**: `{ "status": "UP", "service": "email-verifier", "timestamp": ... }`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health Check"
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::up())
}

/// Registers the health endpoint.
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(health);
}
