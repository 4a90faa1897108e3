//! In-memory backend for development and tests.
//!
//! Serves a fixed location feed and route table as if they came from the
//! HTTP backend, records every search request, and can inject latency or
//! failures.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::catalog::{CatalogError, LocationSource};
use crate::domain::{Location, Route};
use crate::search::{RouteBackend, SearchError, SearchRequest};

use super::convert::{convert_locations, convert_routes};
use super::error::BackendError;
use super::types::{LocationDto, RouteDto};

#[derive(Debug, Default)]
struct MockState {
    locations: Vec<LocationDto>,
    routes: Vec<RouteDto>,
    search_requests: Vec<SearchRequest>,
    location_failure: Option<String>,
    search_failure: Option<String>,
    search_delay: Duration,
}

/// Mock backend that serves data from memory.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<RwLock<MockState>>,
}

impl MockBackend {
    /// Create a mock serving the given location feed and route table.
    pub fn new(locations: Vec<LocationDto>, routes: Vec<RouteDto>) -> Self {
        Self {
            state: Arc::new(RwLock::new(MockState {
                locations,
                routes,
                ..MockState::default()
            })),
        }
    }

    /// Load `locations.json` and `routes.json` from a directory.
    ///
    /// `locations.json` holds the feed exactly as `GET /locations` would
    /// return it; `routes.json` holds a flat array of routes, which are
    /// served to searches whose keys match.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, BackendError> {
        let data_dir = data_dir.as_ref();
        let locations: Vec<LocationDto> = read_json(&data_dir.join("locations.json"))?;
        let routes: Vec<RouteDto> = read_json(&data_dir.join("routes.json"))?;
        Ok(Self::new(locations, routes))
    }

    /// Delay every search response by `delay`.
    pub async fn set_search_delay(&self, delay: Duration) {
        self.state.write().await.search_delay = delay;
    }

    /// Make location fetches fail (`Some`) or succeed again (`None`).
    pub async fn set_location_failure(&self, message: Option<&str>) {
        self.state.write().await.location_failure = message.map(str::to_string);
    }

    /// Make searches fail (`Some`) or succeed again (`None`).
    pub async fn set_search_failure(&self, message: Option<&str>) {
        self.state.write().await.search_failure = message.map(str::to_string);
    }

    /// Replace the location feed.
    pub async fn set_locations(&self, locations: Vec<LocationDto>) {
        self.state.write().await.locations = locations;
    }

    /// Every search request received so far, oldest first.
    pub async fn search_requests(&self) -> Vec<SearchRequest> {
        self.state.read().await.search_requests.clone()
    }

}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, BackendError> {
    let json = std::fs::read_to_string(path).map_err(|e| BackendError::Api {
        status: 0,
        message: format!("Failed to read {:?}: {}", path, e),
    })?;
    serde_json::from_str(&json).map_err(|e| BackendError::json(e, &json))
}

impl LocationSource for MockBackend {
    async fn fetch_locations(&self) -> Result<Vec<Location>, CatalogError> {
        let state = self.state.read().await;
        if let Some(message) = &state.location_failure {
            return Err(CatalogError::Transport {
                message: message.clone(),
            });
        }

        Ok(convert_locations(state.locations.clone()))
    }
}

impl RouteBackend for MockBackend {
    async fn search_routes(&self, request: SearchRequest) -> Result<Vec<Route>, SearchError> {
        let delay = {
            let mut state = self.state.write().await;
            state.search_requests.push(request);
            state.search_delay
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let state = self.state.read().await;
        if let Some(message) = &state.search_failure {
            return Err(SearchError::Transport {
                message: message.clone(),
            });
        }

        let matching: Vec<RouteDto> = state
            .routes
            .iter()
            .filter(|r| {
                r.origin_key == request.origin_key.get()
                    && r.destination_key == request.destination_key.get()
            })
            .cloned()
            .collect();

        convert_routes(matching).map_err(|e| SearchError::Payload {
            message: e.to_string(),
        })
    }
}
