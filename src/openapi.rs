use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Defines the API contract using OpenAPI 3.0 format with utoipa procedural
/// macros; the spec is generated at compile time from these annotations.
///
/// # Endpoints
/// - Health Check: `GET /api/v1/health`
/// - Email Validation: `POST /api/v1/validate-email`
///
/// # Schemas
/// - `HealthResponse`: Service status payload
/// - `EmailRequest`: Email validation input structure
/// - `ValidationReport`: Aggregated validation verdict
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::email::validate_email,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::models::email::EmailRequest,
            crate::models::email::ValidationReport
        )
    ),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Email Validation", description = "Email address validation endpoints")
    ),
    info(
        description = "API for checking whether an email address is well-formed and deliverable",
        title = "Email Verifier API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
