//! Askama templates for the web frontend.

use askama::Template;

use crate::present::{ResultView, RouteItem};
use crate::screen::{FieldView, ScreenView};
use crate::search::Field;

use super::state::ScreenId;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The search screen.
#[derive(Template)]
#[template(path = "screen.html")]
pub struct ScreenTemplate {
    pub id: ScreenId,
    pub origin: FieldTemplateView,
    pub destination: FieldTemplateView,
    pub loading: bool,
    pub routes: Option<Vec<RouteItem>>,
    pub error: Option<String>,
    /// Set when the location list could not be loaded
    pub catalog_error: Option<String>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One input field with its visible candidates.
#[derive(Debug, Clone)]
pub struct FieldTemplateView {
    /// Path segment for the field ("origin" / "destination")
    pub name: &'static str,
    pub label: &'static str,
    pub text: String,
    pub candidates: Vec<CandidateView>,
}

/// A clickable autocomplete candidate.
#[derive(Debug, Clone)]
pub struct CandidateView {
    pub id: String,
    pub name: String,
}

impl FieldTemplateView {
    fn from_field(field: Field, view: &FieldView) -> Self {
        let label = match field {
            Field::Origin => "From",
            Field::Destination => "To",
        };
        Self {
            name: field.as_str(),
            label,
            text: view.text.clone(),
            candidates: view
                .candidates
                .iter()
                .map(|l| CandidateView {
                    id: l.id().to_string(),
                    name: l.display_name().to_string(),
                })
                .collect(),
        }
    }
}

impl ScreenTemplate {
    /// Both fields, in display order.
    pub fn fields(&self) -> [&FieldTemplateView; 2] {
        [&self.origin, &self.destination]
    }

    /// Create from a screen snapshot.
    pub fn from_view(id: ScreenId, view: &ScreenView, catalog_error: Option<String>) -> Self {
        let (loading, routes, error) = match &view.results {
            ResultView::Hidden => (false, None, None),
            ResultView::Loading => (true, None, None),
            ResultView::Routes { routes } => (false, Some(routes.clone()), None),
            ResultView::Error { message } => (false, None, Some(message.clone())),
        };

        Self {
            id,
            origin: FieldTemplateView::from_field(Field::Origin, &view.origin),
            destination: FieldTemplateView::from_field(Field::Destination, &view.destination),
            loading,
            routes,
            error,
            catalog_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, RegionKey};

    fn field(text: &str, candidates: Vec<Location>) -> FieldView {
        FieldView {
            text: text.to_string(),
            candidates,
            resolved: None,
        }
    }

    fn route_item() -> RouteItem {
        RouteItem {
            id: "r1".into(),
            origin: "Lisbon".into(),
            destination: "Berlin".into(),
            price: "120".into(),
            duration_minutes: 95,
            direct_segments: vec!["flight".into()],
        }
    }

    #[test]
    fn renders_candidates_and_routes() {
        let view = ScreenView {
            origin: field(
                "Li",
                vec![Location::new("1", "Lisbon", RegionKey::new(7)).unwrap()],
            ),
            destination: field("Berlin", Vec::new()),
            results: ResultView::Routes {
                routes: vec![route_item()],
            },
        };

        let html = ScreenTemplate::from_view(3, &view, None).render().unwrap();

        assert!(html.contains("/screens/3/fields/origin/select"));
        assert!(html.contains("Lisbon"));
        assert!(html.contains("Price: 120"));
        assert!(html.contains("Duration: 95 minutes"));
    }

    #[test]
    fn renders_loading_and_error_states() {
        let mut view = ScreenView {
            origin: field("", Vec::new()),
            destination: field("", Vec::new()),
            results: ResultView::Loading,
        };
        let html = ScreenTemplate::from_view(1, &view, None).render().unwrap();
        assert!(html.contains("Searching"));

        view.results = ResultView::Error {
            message: "search timed out after 30s".into(),
        };
        let html = ScreenTemplate::from_view(1, &view, Some("feed down".into()))
            .render()
            .unwrap();
        assert!(html.contains("search timed out after 30s"));
        assert!(html.contains("feed down"));
    }

    #[test]
    fn renders_empty_result_message() {
        let view = ScreenView {
            origin: field("", Vec::new()),
            destination: field("", Vec::new()),
            results: ResultView::Routes { routes: Vec::new() },
        };
        let html = ScreenTemplate::from_view(1, &view, None).render().unwrap();
        assert!(html.contains("No routes found"));
    }

    #[test]
    fn escapes_user_text() {
        let view = ScreenView {
            origin: field("<script>", Vec::new()),
            destination: field("", Vec::new()),
            results: ResultView::Hidden,
        };
        let html = ScreenTemplate::from_view(1, &view, None).render().unwrap();
        assert!(!html.contains("<script>"));
    }
}
