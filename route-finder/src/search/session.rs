//! Search session state machine.

use std::fmt;

use serde::Serialize;

use crate::domain::Route;

use super::error::SearchError;

/// Generation token for submitted searches.
///
/// Strictly increases over the life of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        RequestId(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

/// State of one screen's searches.
///
/// `routes` is only non-empty in [`SessionState::Success`], `last_error`
/// only set in [`SessionState::Failed`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    state: SessionState,
    request_id: RequestId,
    routes: Vec<Route>,
    last_error: Option<SearchError>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Id of the most recently issued request, or of the last clear.
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Routes from the last successful search, in backend order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn last_error(&self) -> Option<&SearchError> {
        self.last_error.as_ref()
    }

    /// Whether a response tagged `id` would be accepted.
    pub fn is_current(&self, id: RequestId) -> bool {
        self.state == SessionState::Submitting && id == self.request_id
    }

    /// Start a new attempt, superseding any attempt in flight.
    pub fn begin(&mut self) -> RequestId {
        self.request_id = self.request_id.next();
        self.state = SessionState::Submitting;
        self.routes.clear();
        self.last_error = None;
        self.request_id
    }

    /// Apply the outcome of request `id`.
    ///
    /// Returns `false` without changing anything if `id` is not the
    /// current in-flight request.
    pub fn finish(&mut self, id: RequestId, outcome: Result<Vec<Route>, SearchError>) -> bool {
        if !self.is_current(id) {
            return false;
        }

        match outcome {
            Ok(routes) => {
                self.state = SessionState::Success;
                self.routes = routes;
            }
            Err(e) => {
                self.state = SessionState::Failed;
                self.last_error = Some(e);
            }
        }
        true
    }

    /// Return to `Idle` with no routes or error.
    ///
    /// The request id still advances so any response in flight is stale.
    pub fn reset(&mut self) {
        self.request_id = self.request_id.next();
        self.state = SessionState::Idle;
        self.routes.clear();
        self.last_error = None;
    }
}
