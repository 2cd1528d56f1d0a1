use actix_web::{HttpResponse, error::InternalError, web};
use serde_json::json;

/// # Health Check Endpoint
///
/// Liveness probe returning a fixed payload, independent of the validation
/// pipeline.
pub mod health;

/// # Email Validation Endpoint
///
/// Accepts `{ "email": string }` and returns the aggregated verdict
/// `{ email, valid, messages }`. Request-shape problems are answered with
/// 400 before the pipeline runs.
pub mod email;

/// # API Route Configuration
///
/// Mounts the versioned endpoints under `/api/v1`:
///
/// ```text
/// GET  /api/v1/health          - Service health status
/// POST /api/v1/validate-email  - Email validation endpoint
/// ```
///
/// The scope installs a JSON extractor error handler so malformed request
/// bodies produce a structured 400 response, distinguishable from a
/// validation verdict by status code.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config())
            .configure(health::configure_routes)
            .configure(email::configure_routes),
    );
}

/// Maps body deserialization failures to a 400 JSON envelope. These are
/// request-shape errors, not validation verdicts.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({
                "error": "BAD_REQUEST",
                "message": message
            })),
        )
        .into()
    })
}
