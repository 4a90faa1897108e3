//! Search error types.

use std::time::Duration;

use crate::backend::BackendError;
use crate::domain::LocationId;

use super::query::Field;

/// Error from a submitted search.
///
/// Held by the session as data for the presenter; none of these are fatal
/// and the user may resubmit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Network failure or error status from the search endpoint
    #[error("search request failed: {message}")]
    Transport { message: String },

    /// The search endpoint answered with a payload we could not parse
    #[error("malformed search response: {message}")]
    Payload { message: String },

    /// No response arrived within the configured timeout
    #[error("search timed out after {after:?}")]
    Timeout { after: Duration },
}

impl SearchError {
    pub fn is_payload(&self) -> bool {
        matches!(self, SearchError::Payload { .. })
    }
}

impl From<BackendError> for SearchError {
    fn from(err: BackendError) -> Self {
        let message = err.to_string();
        if err.is_payload() {
            SearchError::Payload { message }
        } else {
            SearchError::Transport { message }
        }
    }
}

/// Error from selecting a candidate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// The location is not among the field's current candidates
    #[error("location {id} is not a candidate for the {field} field")]
    NotACandidate { field: Field, id: LocationId },
}
