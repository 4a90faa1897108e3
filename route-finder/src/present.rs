//! Turns a search session into something a page can render.
//!
//! Routes keep the order the backend returned; nothing here ranks them.

use serde::Serialize;

use crate::catalog::CatalogSnapshot;
use crate::domain::{RegionKey, Route};
use crate::search::{SearchSession, SessionState};

/// Source of human-readable names for region keys.
pub trait RegionLabels {
    fn label(&self, key: RegionKey) -> Option<&str>;
}

impl RegionLabels for CatalogSnapshot {
    fn label(&self, key: RegionKey) -> Option<&str> {
        self.label_for(key)
    }
}

/// One route, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteItem {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub price: String,
    pub duration_minutes: u32,
    pub direct_segments: Vec<String>,
}

/// What the results area shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResultView {
    /// Nothing searched yet, or cleared
    Hidden,
    /// A search is in flight
    Loading,
    /// A search finished; may be empty
    Routes { routes: Vec<RouteItem> },
    /// A search failed
    Error { message: String },
}

impl ResultView {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResultView::Loading)
    }
}

/// Present the session's current state.
pub fn present(session: &SearchSession, labels: &impl RegionLabels) -> ResultView {
    match session.state() {
        SessionState::Idle => ResultView::Hidden,
        SessionState::Submitting => ResultView::Loading,
        SessionState::Success => ResultView::Routes {
            routes: session
                .routes()
                .iter()
                .map(|r| route_item(r, labels))
                .collect(),
        },
        SessionState::Failed => ResultView::Error {
            message: session
                .last_error()
                .map(ToString::to_string)
                .unwrap_or_else(|| "search failed".to_string()),
        },
    }
}

fn route_item(route: &Route, labels: &impl RegionLabels) -> RouteItem {
    RouteItem {
        id: route.id.to_string(),
        origin: label_or_key(labels, route.origin_key),
        destination: label_or_key(labels, route.destination_key),
        price: format_price(route.price),
        duration_minutes: route.duration_minutes,
        direct_segments: route.direct_segments.iter().cloned().collect(),
    }
}

fn label_or_key(labels: &impl RegionLabels, key: RegionKey) -> String {
    labels
        .label(key)
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

/// Format a currency-less price: whole amounts without decimals, anything
/// else with two.
pub fn format_price(price: f64) -> String {
    // -0.0 prints as "-0"
    let price = if price == 0.0 { 0.0 } else { price };
    if price.fract() == 0.0 {
        format!("{price:.0}")
    } else {
        format!("{price:.2}")
    }
}
