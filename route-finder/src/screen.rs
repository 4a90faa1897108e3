//! One search screen: the coordinator plus the tasks that run its searches.
//!
//! Text input, selection and clear are applied synchronously. Submit issues
//! a ticket and spawns a task that performs the search, bounded by the
//! configured timeout, and hands the outcome back to the coordinator, which
//! drops it if a later submit or a clear made it stale.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::catalog::LocationCatalog;
use crate::domain::{Location, LocationId, Route};
use crate::present::{ResultView, present};
use crate::search::{
    Completion, Field, RouteBackend, SearchConfig, SearchCoordinator, SearchError, SearchRequest,
    SearchSession, SelectError,
};

/// Handle to a search task spawned by [`Screen::submit`].
pub type SearchHandle = JoinHandle<Completion>;

/// Snapshot of one input field for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub text: String,
    pub candidates: Vec<Location>,
    pub resolved: Option<Location>,
}

/// Snapshot of a whole screen for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub origin: FieldView,
    pub destination: FieldView,
    pub results: ResultView,
}

/// A search screen bound to a catalog and a backend.
#[derive(Debug)]
pub struct Screen<B> {
    coordinator: Arc<Mutex<SearchCoordinator>>,
    catalog: LocationCatalog,
    backend: Arc<B>,
    timeout: Duration,
}

impl<B: RouteBackend + 'static> Screen<B> {
    pub fn new(catalog: LocationCatalog, backend: Arc<B>, config: &SearchConfig) -> Self {
        Self {
            coordinator: Arc::new(Mutex::new(SearchCoordinator::new(config.payload_policy))),
            catalog,
            backend,
            timeout: config.timeout,
        }
    }

    /// The user edited a field.
    pub fn set_text(&self, field: Field, text: impl Into<String>) {
        let snapshot = self.catalog.snapshot();
        self.lock().set_text(field, text, snapshot.locations());
    }

    /// The user picked a candidate.
    pub fn select(&self, field: Field, id: &LocationId) -> Result<(), SelectError> {
        let snapshot = self.catalog.snapshot();
        self.lock().select(field, id, snapshot.locations())
    }

    /// Submit a search.
    ///
    /// Returns `None` if either field is unresolved; nothing is sent then.
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self) -> Option<SearchHandle> {
        let ticket = self.lock().submit()?;

        let coordinator = Arc::clone(&self.coordinator);
        let backend = Arc::clone(&self.backend);
        let timeout = self.timeout;

        Some(tokio::spawn(async move {
            let outcome = search_with_timeout(backend.as_ref(), ticket.request, timeout).await;
            coordinator
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .complete(ticket.request_id, outcome)
        }))
    }

    /// Reset both fields and the session; in-flight searches become stale.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// A copy of the current session.
    pub fn session(&self) -> SearchSession {
        self.lock().session().clone()
    }

    /// Everything needed to render the screen.
    pub fn view(&self) -> ScreenView {
        let snapshot = self.catalog.snapshot();
        let coordinator = self.lock();
        let field_view = |field| {
            let query = coordinator.field(field);
            FieldView {
                text: query.raw_text().to_string(),
                candidates: query.visible_candidates().to_vec(),
                resolved: query.resolved().cloned(),
            }
        };

        ScreenView {
            origin: field_view(Field::Origin),
            destination: field_view(Field::Destination),
            results: present(coordinator.session(), &*snapshot),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SearchCoordinator> {
        self.coordinator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Run one search, failing with [`SearchError::Timeout`] if it takes too long.
async fn search_with_timeout<B: RouteBackend>(
    backend: &B,
    request: SearchRequest,
    timeout: Duration,
) -> Result<Vec<Route>, SearchError> {
    match tokio::time::timeout(timeout, backend.search_routes(request)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!("search timed out after {timeout:?}");
            Err(SearchError::Timeout { after: timeout })
        }
    }
}
