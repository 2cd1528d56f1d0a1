use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for the validation endpoint.
#[derive(Deserialize, ToSchema)]
pub struct EmailRequest {
    pub email: String,
}

/// Verdict for one validation request.
///
/// `messages` is append-only and ordered by pipeline stage: format, domain,
/// disposable, summary. It is never empty once the pipeline completes; a
/// format failure short-circuits with its single diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationReport {
    /// The (trimmed) address that was validated.
    pub email: String,
    /// True only when every configured check passed.
    pub valid: bool,
    /// Human-readable diagnostics, one or more per executed stage.
    pub messages: Vec<String>,
}

impl ValidationReport {
    /// Starts an empty report; `valid` is false until the pipeline decides
    /// otherwise.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            valid: false,
            messages: Vec::new(),
        }
    }

    /// Appends one diagnostic message.
    pub fn note(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}
