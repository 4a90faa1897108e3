//! Wire types for the backend JSON contract.

use serde::{Deserialize, Serialize};

/// A location entry from `GET /locations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub id: String,
    pub name: String,
    pub region_key: u64,
}

/// Request body for `POST /search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub origin_key: u64,
    pub destination_key: u64,
}

/// Response body for `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteDto>,
}

/// A route entry in a search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub id: String,
    pub origin_key: u64,
    pub destination_key: u64,
    pub price: f64,
    pub duration_minutes: u32,
    #[serde(default)]
    pub direct_segments: Vec<String>,
}
