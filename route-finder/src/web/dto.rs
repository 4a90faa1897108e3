//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Location;
use crate::present::ResultView;
use crate::screen::{FieldView, ScreenView};

use super::state::ScreenId;

/// New text for an input field.
#[derive(Debug, Deserialize)]
pub struct TextInput {
    #[serde(default)]
    pub text: String,
}

/// A candidate the user picked.
#[derive(Debug, Deserialize)]
pub struct SelectInput {
    pub location_id: String,
}

/// Query for stateless location autocomplete.
#[derive(Debug, Deserialize)]
pub struct LocationSearchRequest {
    /// Name prefix
    #[serde(default)]
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// A location in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub id: String,
    pub name: String,
    pub region_key: u64,
}

impl From<&Location> for LocationResult {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id().to_string(),
            name: location.display_name().to_string(),
            region_key: location.region_key().get(),
        }
    }
}

/// Response for location autocomplete.
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationSearchResponse {
    pub locations: Vec<LocationResult>,
}

/// One input field of a screen.
#[derive(Debug, Serialize)]
pub struct FieldResponse {
    pub text: String,
    /// Candidates currently shown (empty after a selection)
    pub candidates: Vec<LocationResult>,
    pub resolved: Option<LocationResult>,
}

impl From<&FieldView> for FieldResponse {
    fn from(view: &FieldView) -> Self {
        Self {
            text: view.text.clone(),
            candidates: view.candidates.iter().map(LocationResult::from).collect(),
            resolved: view.resolved.as_ref().map(LocationResult::from),
        }
    }
}

/// Full state of a screen.
#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub id: ScreenId,
    pub origin: FieldResponse,
    pub destination: FieldResponse,
    pub results: ResultView,
}

impl ScreenResponse {
    pub fn from_view(id: ScreenId, view: &ScreenView) -> Self {
        Self {
            id,
            origin: FieldResponse::from(&view.origin),
            destination: FieldResponse::from(&view.destination),
            results: view.results.clone(),
        }
    }
}

/// Response to a submit.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// False when either field had nothing to search for
    pub submitted: bool,

    pub screen: ScreenResponse,
}

/// Response to opening a screen.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedScreen {
    pub id: ScreenId,
}

/// Response to a catalog reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    /// Locations now in the catalog
    pub locations: usize,

    /// When the catalog contents were fetched
    pub loaded_at: Option<DateTime<Utc>>,

    /// Whether a newer reload overtook this one
    pub superseded: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
