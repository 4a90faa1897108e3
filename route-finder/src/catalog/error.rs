//! Catalog error types.

use crate::backend::BackendError;

/// Errors from loading the location catalog.
///
/// Non-fatal: the catalog keeps its previous contents and the caller decides
/// whether to retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Network failure or error status from the location feed
    #[error("failed to fetch locations: {message}")]
    Transport { message: String },

    /// The feed could not be parsed
    #[error("malformed location feed: {message}")]
    Payload { message: String },
}

impl From<BackendError> for CatalogError {
    fn from(err: BackendError) -> Self {
        let message = err.to_string();
        if err.is_payload() {
            CatalogError::Payload { message }
        } else {
            CatalogError::Transport { message }
        }
    }
}
