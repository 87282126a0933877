use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Why an LLM reply could not be turned into leads.
#[derive(thiserror::Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to parse JSON from response: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Expected a JSON array of leads")]
    NotAnArray,

    #[error("No leads extracted from content")]
    NoLeads,

    #[error("LLM request failed: {0}")]
    Provider(String),
}

impl ExtractionError {
    /// Parse failures are the only ones the tolerant policy may swallow.
    pub fn is_parse_failure(&self) -> bool {
        !matches!(self, ExtractionError::Provider(_))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LeadGenError {
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

impl LeadGenError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LeadGenError::Validation(_) => StatusCode::BAD_REQUEST,
            LeadGenError::Configuration(_)
            | LeadGenError::Retrieval(_)
            | LeadGenError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body text for the `detail` field of an error response.
    pub fn detail(&self) -> String {
        match self {
            LeadGenError::Validation(msg) => msg.clone(),
            other => format!("Error processing search query: {}", other),
        }
    }
}

impl IntoResponse for LeadGenError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}
