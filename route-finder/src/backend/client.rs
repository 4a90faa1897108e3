//! Route search backend HTTP client.

use std::time::Duration;

use tracing::debug;

use crate::catalog::{CatalogError, LocationSource};
use crate::domain::{Location, Route};
use crate::search::{RouteBackend, SearchError, SearchRequest};

use super::convert::{convert_locations, convert_routes};
use super::error::BackendError;
use super::types::{LocationDto, RoutesResponse, SearchBody};

/// Default base URL for the route search backend.
pub const DEFAULT_BASE_URL: &str = "https://cheaptrip.pythonanywhere.com/api";

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// HTTP client for the location feed and route search endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full location feed, in feed order.
    pub async fn get_locations(&self) -> Result<Vec<Location>, BackendError> {
        let url = format!("{}/locations", self.base_url);

        let response = self.http.get(&url).send().await?;
        let body = read_success_body(response).await?;

        let dtos: Vec<LocationDto> =
            serde_json::from_str(&body).map_err(|e| BackendError::json(e, &body))?;

        debug!("fetched {} location entries", dtos.len());
        Ok(convert_locations(dtos))
    }

    /// Search for routes between two region keys.
    ///
    /// Routes are returned in the order the backend ranked them.
    pub async fn post_search(&self, body: SearchBody) -> Result<Vec<Route>, BackendError> {
        let url = format!("{}/search", self.base_url);

        let response = self.http.post(&url).json(&body).send().await?;
        let text = read_success_body(response).await?;

        let parsed: RoutesResponse =
            serde_json::from_str(&text).map_err(|e| BackendError::json(e, &text))?;

        Ok(convert_routes(parsed.routes)?)
    }
}

/// Check the status and read the body of a response.
async fn read_success_body(response: reqwest::Response) -> Result<String, BackendError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(BackendError::Unauthorized);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

impl LocationSource for BackendClient {
    async fn fetch_locations(&self) -> Result<Vec<Location>, CatalogError> {
        Ok(self.get_locations().await?)
    }
}

impl RouteBackend for BackendClient {
    async fn search_routes(&self, request: SearchRequest) -> Result<Vec<Route>, SearchError> {
        Ok(self.post_search(SearchBody::from(request)).await?)
    }
}

impl From<SearchRequest> for SearchBody {
    fn from(request: SearchRequest) -> Self {
        SearchBody {
            origin_key: request.origin_key.get(),
            destination_key: request.destination_key.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegionKey;

    #[test]
    fn config_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = BackendConfig::new("http://localhost:8080/").with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        let client = BackendClient::new(BackendConfig::new("http://localhost:8080"));
        assert!(client.is_ok());
    }

    #[test]
    fn search_body_from_request() {
        let request = SearchRequest {
            origin_key: RegionKey::new(7),
            destination_key: RegionKey::new(42),
        };
        assert_eq!(
            SearchBody::from(request),
            SearchBody {
                origin_key: 7,
                destination_key: 42
            }
        );
    }
}
