/// Request and response bodies for the validation endpoint.
pub mod email;

/// Liveness payload for the health endpoint.
pub mod health;

pub use email::{EmailRequest, ValidationReport};
pub use health::HealthResponse;
