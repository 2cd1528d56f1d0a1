use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness payload for the health endpoint.
///
/// Fixed-shape response with no dependency on the validation pipeline:
/// `status` is always "UP" while the process is serving, `timestamp` is the
/// RFC 3339 time of the check.
#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn up() -> Self {
        Self {
            status: "UP".to_string(),
            service: "email-verifier".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
