//! Backend client error types.

use crate::domain::DomainError;

/// Errors from the backend HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected our credentials
    #[error("unauthorized")]
    Unauthorized,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON shape
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response parsed but carried values the domain rejects
    #[error("invalid payload: {0}")]
    Invalid(#[from] DomainError),
}

impl BackendError {
    /// Whether the call completed but the payload was malformed.
    ///
    /// Everything else is a transport-level failure.
    pub fn is_payload(&self) -> bool {
        matches!(self, BackendError::Json { .. } | BackendError::Invalid(_))
    }

    /// Build a JSON error, keeping a bounded prefix of the body for logs.
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        BackendError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}
