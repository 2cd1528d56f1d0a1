use actix_web::{HttpResponse, Responder, post, web};

use crate::models::EmailRequest;
use crate::validation::pipeline::ValidationPipeline;

/// # Email Validation Endpoint
///
/// Validates an email address by checking three aspects in order:
/// 1. Structural syntax validation
/// 2. Domain DNS/MX record resolution
/// 3. Disposable email domain classification
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with `email` field
///
/// ## Responses
/// - **200 OK**: a completed verdict, `{ email, valid, messages }`. A failed
///   validation is still a successful request — `valid` is `false` and
///   `messages` explains why.
/// - **400 Bad Request**: malformed request body (invalid JSON, missing or
///   mistyped `email` field); the pipeline is never invoked.
///
/// ## Example Request
/// ```json
/// { "email": "user@example.com" }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/validate-email",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Validation verdict", body = crate::models::ValidationReport),
        (status = 400, description = "Malformed request body")
    ),
    tag = "Email Validation"
)]
#[post("/validate-email")]
pub async fn validate_email(
    req: web::Json<EmailRequest>,
    pipeline: web::Data<ValidationPipeline>,
) -> impl Responder {
    let report = pipeline.validate(&req.email).await;
    HttpResponse::Ok().json(report)
}

/// Registers the email validation endpoint.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(validate_email);
}
