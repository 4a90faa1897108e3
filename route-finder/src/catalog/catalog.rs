//! The in-memory location catalog.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{Location, RegionKey};

use super::error::CatalogError;

/// Source of the full location feed.
///
/// This abstraction allows the catalog to be tested without HTTP.
pub trait LocationSource: Send + Sync {
    /// Fetch every known location, in feed order.
    fn fetch_locations(&self) -> impl Future<Output = Result<Vec<Location>, CatalogError>> + Send;
}

/// One immutable generation of the catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    locations: Vec<Location>,
    loaded_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    /// Create a snapshot loaded now.
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations,
            loaded_at: Some(Utc::now()),
        }
    }

    /// Locations in feed order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// When this snapshot was loaded, or `None` if nothing has loaded yet.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Display name of the first location in `key`'s region.
    pub fn label_for(&self, key: RegionKey) -> Option<&str> {
        self.locations
            .iter()
            .find(|l| l.region_key() == key)
            .map(Location::display_name)
    }
}

/// Result of a catalog load that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The catalog was replaced with this many locations.
    Loaded(usize),
    /// A later load was started before this one finished; its result was
    /// discarded.
    Superseded,
}

#[derive(Debug, Default)]
struct CatalogState {
    /// Generation of the most recently started load.
    issued: u64,
    snapshot: Arc<CatalogSnapshot>,
    last_error: Option<CatalogError>,
}

/// Shared handle to the location catalog.
///
/// Cloning is cheap and clones share state. Reads are synchronous so text
/// input never waits on the network.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl LocationCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.read().snapshot)
    }

    /// Error from the most recent load, cleared by the next successful one.
    pub fn last_error(&self) -> Option<CatalogError> {
        self.read().last_error.clone()
    }

    /// Fetch the full location set and replace the catalog with it.
    ///
    /// On failure the current contents are kept and the error is recorded.
    /// No retry is attempted. Loads may overlap: only the most recently
    /// started load may change the catalog, and earlier ones report
    /// [`LoadOutcome::Superseded`] when they finish.
    pub async fn load<S: LocationSource>(&self, source: &S) -> Result<LoadOutcome, CatalogError> {
        let generation = {
            let mut state = self.write();
            state.issued += 1;
            state.issued
        };

        let result = source.fetch_locations().await;

        let mut state = self.write();
        if state.issued != generation {
            debug!(
                "discarding catalog load {generation}, superseded by {}",
                state.issued
            );
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(locations) => {
                let count = locations.len();
                state.snapshot = Arc::new(CatalogSnapshot::new(locations));
                state.last_error = None;
                info!("loaded {count} locations");
                Ok(LoadOutcome::Loaded(count))
            }
            Err(e) => {
                warn!(
                    "catalog load failed, keeping {} locations: {e}",
                    state.snapshot.len()
                );
                state.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    type FetchResult = Result<Vec<Location>, CatalogError>;

    fn loc(id: &str, name: &str, key: u64) -> Location {
        Location::new(id, name, RegionKey::new(key)).unwrap()
    }

    fn transport(message: &str) -> CatalogError {
        CatalogError::Transport {
            message: message.to_string(),
        }
    }

    /// Returns queued results in order.
    struct FixedSource {
        results: Mutex<VecDeque<FetchResult>>,
    }

    impl FixedSource {
        fn new(results: Vec<FetchResult>) -> Self {
            Self {
                results: Mutex::new(results.into()),
            }
        }
    }

    impl LocationSource for FixedSource {
        async fn fetch_locations(&self) -> FetchResult {
            self.results.lock().unwrap().pop_front().unwrap()
        }
    }

    /// Each fetch waits for the test to release its result.
    struct GatedSource {
        gates: Mutex<VecDeque<oneshot::Receiver<FetchResult>>>,
    }

    impl LocationSource for GatedSource {
        async fn fetch_locations(&self) -> FetchResult {
            let gate = self.gates.lock().unwrap().pop_front().unwrap();
            gate.await.unwrap()
        }
    }

    #[test]
    fn starts_empty() {
        let catalog = LocationCatalog::new();
        assert!(catalog.snapshot().is_empty());
        assert!(catalog.snapshot().loaded_at().is_none());
        assert!(catalog.last_error().is_none());
    }

    #[tokio::test]
    async fn load_replaces_catalog() {
        let catalog = LocationCatalog::new();
        let source = FixedSource::new(vec![
            Ok(vec![loc("1", "Kyiv", 10), loc("2", "Lviv", 11)]),
            Ok(vec![loc("3", "Odesa", 12)]),
        ]);

        assert_eq!(catalog.load(&source).await, Ok(LoadOutcome::Loaded(2)));
        assert_eq!(catalog.snapshot().len(), 2);
        assert!(catalog.snapshot().loaded_at().is_some());

        assert_eq!(catalog.load(&source).await, Ok(LoadOutcome::Loaded(1)));
        let snapshot = catalog.snapshot();
        assert_eq!(snapshot.locations()[0].display_name(), "Odesa");
    }

    #[tokio::test]
    async fn failed_first_load_leaves_catalog_empty() {
        let catalog = LocationCatalog::new();
        let source = FixedSource::new(vec![Err(transport("refused"))]);

        assert_eq!(catalog.load(&source).await, Err(transport("refused")));
        assert!(catalog.snapshot().is_empty());
        assert_eq!(catalog.last_error(), Some(transport("refused")));
    }

    #[tokio::test]
    async fn failed_reload_keeps_contents_and_success_clears_error() {
        let catalog = LocationCatalog::new();
        let source = FixedSource::new(vec![
            Ok(vec![loc("1", "Kyiv", 10)]),
            Err(transport("timeout")),
            Ok(vec![loc("1", "Kyiv", 10), loc("2", "Lviv", 11)]),
        ]);

        catalog.load(&source).await.unwrap();
        assert!(catalog.load(&source).await.is_err());
        assert_eq!(catalog.snapshot().len(), 1);
        assert!(catalog.last_error().is_some());

        catalog.load(&source).await.unwrap();
        assert_eq!(catalog.snapshot().len(), 2);
        assert!(catalog.last_error().is_none());
    }

    #[tokio::test]
    async fn overlapping_loads_last_started_wins() {
        let catalog = LocationCatalog::new();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let source = GatedSource {
            gates: Mutex::new(VecDeque::from([first_rx, second_rx])),
        };

        let (first, second, ()) = tokio::join!(catalog.load(&source), catalog.load(&source), async {
            // Newer load finishes first, older one arrives late
            second_tx.send(Ok(vec![loc("2", "Lviv", 11)])).unwrap();
            tokio::task::yield_now().await;
            first_tx.send(Ok(vec![loc("1", "Kyiv", 10)])).unwrap();
        });

        assert_eq!(first, Ok(LoadOutcome::Superseded));
        assert_eq!(second, Ok(LoadOutcome::Loaded(1)));
        assert_eq!(catalog.snapshot().locations()[0].display_name(), "Lviv");
    }

    #[tokio::test]
    async fn superseded_failure_is_not_recorded() {
        let catalog = LocationCatalog::new();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let source = GatedSource {
            gates: Mutex::new(VecDeque::from([first_rx, second_rx])),
        };

        let (first, second, ()) = tokio::join!(catalog.load(&source), catalog.load(&source), async {
            first_tx.send(Err(transport("late failure"))).unwrap();
            second_tx.send(Ok(vec![loc("1", "Kyiv", 10)])).unwrap();
        });

        assert_eq!(first, Ok(LoadOutcome::Superseded));
        assert_eq!(second, Ok(LoadOutcome::Loaded(1)));
        assert!(catalog.last_error().is_none());
    }

    #[test]
    fn snapshot_labels() {
        let snapshot = CatalogSnapshot::new(vec![
            loc("1", "Kyiv", 10),
            loc("2", "Kyiv Zhuliany", 10),
            loc("3", "Lviv", 11),
        ]);

        assert!(snapshot.loaded_at().is_some());
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.label_for(RegionKey::new(10)), Some("Kyiv"));
        assert_eq!(snapshot.label_for(RegionKey::new(99)), None);
    }
}
