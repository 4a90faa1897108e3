//! Application state for the web layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::catalog::{LocationCatalog, LocationSource};
use crate::screen::Screen;
use crate::search::{RouteBackend, SearchConfig};

/// Everything the web layer needs from a backend.
pub trait Backend: RouteBackend + LocationSource + 'static {}

impl<T: RouteBackend + LocationSource + 'static> Backend for T {}

/// Identifier of a screen hosted by the server.
pub type ScreenId = u64;

/// Configuration for the screen registry.
#[derive(Debug, Clone)]
pub struct ScreenRegistryConfig {
    /// A screen untouched for this long is dropped, along with its session.
    pub idle_ttl: Duration,

    /// Maximum number of live screens.
    pub max_screens: u64,
}

impl Default for ScreenRegistryConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(30 * 60),
            max_screens: 10_000,
        }
    }
}

/// Live screens, one per browser page.
pub struct ScreenRegistry<B> {
    screens: MokaCache<ScreenId, Arc<Screen<B>>>,
    next_id: AtomicU64,
}

impl<B: Backend> ScreenRegistry<B> {
    pub fn new(config: &ScreenRegistryConfig) -> Self {
        let screens = MokaCache::builder()
            .time_to_idle(config.idle_ttl)
            .max_capacity(config.max_screens)
            .build();

        Self {
            screens,
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new screen and return its ID.
    pub async fn insert(&self, screen: Screen<B>) -> ScreenId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.screens.insert(id, Arc::new(screen)).await;
        id
    }

    pub async fn get(&self, id: ScreenId) -> Option<Arc<Screen<B>>> {
        self.screens.get(&id).await
    }

    /// Number of live screens (approximate, for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.screens.entry_count()
    }
}

/// Shared application state.
pub struct AppState<B> {
    /// Location catalog shared by all screens
    pub catalog: LocationCatalog,

    /// Route search backend
    pub backend: Arc<B>,

    /// Search configuration applied to new screens
    pub config: Arc<SearchConfig>,

    /// Live screens
    pub screens: Arc<ScreenRegistry<B>>,
}

impl<B: Backend> AppState<B> {
    /// Create a new app state.
    pub fn new(
        catalog: LocationCatalog,
        backend: B,
        config: SearchConfig,
        registry_config: &ScreenRegistryConfig,
    ) -> Self {
        Self {
            catalog,
            backend: Arc::new(backend),
            config: Arc::new(config),
            screens: Arc::new(ScreenRegistry::new(registry_config)),
        }
    }

    /// Create and register a fresh screen.
    pub async fn open_screen(&self) -> ScreenId {
        let screen = Screen::new(self.catalog.clone(), Arc::clone(&self.backend), &self.config);
        let id = self.screens.insert(screen).await;
        debug!("opened screen {id} ({} live)", self.screens.entry_count());
        id
    }
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            backend: Arc::clone(&self.backend),
            config: Arc::clone(&self.config),
            screens: Arc::clone(&self.screens),
        }
    }
}
