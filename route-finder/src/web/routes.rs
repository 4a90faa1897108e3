//! HTTP route handlers.

use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::catalog::{CatalogError, LoadOutcome, matching};
use crate::domain::LocationId;
use crate::screen::Screen;
use crate::search::{Field, SelectError};

use super::dto::*;
use super::state::{AppState, Backend, ScreenId};
use super::templates::*;

/// Default and maximum result counts for location search.
const DEFAULT_LOCATION_LIMIT: usize = 10;
const MAX_LOCATION_LIMIT: usize = 50;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<B: Backend>(state: AppState<B>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(open_screen_page::<B>))
        .route("/health", get(health))
        .route("/api/locations/search", get(search_locations::<B>))
        .route("/api/catalog/reload", post(reload_catalog::<B>))
        .route("/screens", post(open_screen::<B>))
        .route("/screens/:id", get(show_screen::<B>))
        .route("/screens/:id/fields/:field", post(edit_field::<B>))
        .route("/screens/:id/fields/:field/select", post(select_candidate::<B>))
        .route("/screens/:id/submit", post(submit::<B>))
        .route("/screens/:id/clear", post(clear::<B>))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn screen_url(id: ScreenId) -> String {
    format!("/screens/{id}")
}

async fn find_screen<B: Backend>(
    state: &AppState<B>,
    id: ScreenId,
) -> Result<Arc<Screen<B>>, WebError> {
    state.screens.get(id).await.ok_or_else(|| WebError::NotFound {
        message: format!("Screen {id} not found or expired"),
    })
}

/// Render a screen as HTML or JSON depending on the Accept header.
fn render_screen<B: Backend>(
    state: &AppState<B>,
    id: ScreenId,
    screen: &Screen<B>,
    headers: &HeaderMap,
) -> Result<Response, WebError> {
    let view = screen.view();

    if accepts_html(headers) {
        let catalog_error = state.catalog.last_error().map(|e| e.to_string());
        let html = ScreenTemplate::from_view(id, &view, catalog_error)
            .render()
            .map_err(|e| WebError::Internal {
                message: format!("Template error: {}", e),
            })?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(ScreenResponse::from_view(id, &view)).into_response())
    }
}

/// After a form post, send browsers back to the screen; answer API
/// clients with the new state.
fn after_action<B: Backend>(
    state: &AppState<B>,
    id: ScreenId,
    screen: &Screen<B>,
    headers: &HeaderMap,
) -> Result<Response, WebError> {
    if accepts_html(headers) {
        Ok(Redirect::to(&screen_url(id)).into_response())
    } else {
        render_screen(state, id, screen, headers)
    }
}

/// Index: open a fresh screen and redirect to it.
async fn open_screen_page<B: Backend>(State(state): State<AppState<B>>) -> Redirect {
    let id = state.open_screen().await;
    Redirect::to(&screen_url(id))
}

/// Open a fresh screen (API).
async fn open_screen<B: Backend>(
    State(state): State<AppState<B>>,
) -> (StatusCode, Json<CreatedScreen>) {
    let id = state.open_screen().await;
    (StatusCode::CREATED, Json(CreatedScreen { id }))
}

async fn show_screen<B: Backend>(
    State(state): State<AppState<B>>,
    headers: HeaderMap,
    Path(id): Path<ScreenId>,
) -> Result<Response, WebError> {
    match find_screen(&state, id).await {
        Ok(screen) => render_screen(&state, id, &screen, &headers),
        Err(WebError::NotFound { message }) if accepts_html(&headers) => {
            expired_page(message)
        }
        Err(e) => Err(e),
    }
}

/// Page shown when a browser follows a link to an expired screen.
fn expired_page(message: String) -> Result<Response, WebError> {
    let template = ErrorTemplate {
        title: "Search expired".to_string(),
        message,
    };
    let html = template.render().map_err(|e| WebError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

async fn edit_field<B: Backend>(
    State(state): State<AppState<B>>,
    headers: HeaderMap,
    Path((id, field)): Path<(ScreenId, Field)>,
    Form(input): Form<TextInput>,
) -> Result<Response, WebError> {
    let screen = find_screen(&state, id).await?;
    screen.set_text(field, input.text);
    after_action(&state, id, &screen, &headers)
}

async fn select_candidate<B: Backend>(
    State(state): State<AppState<B>>,
    headers: HeaderMap,
    Path((id, field)): Path<(ScreenId, Field)>,
    Form(input): Form<SelectInput>,
) -> Result<Response, WebError> {
    let screen = find_screen(&state, id).await?;
    let location_id = LocationId::new(input.location_id).map_err(|e| WebError::BadRequest {
        message: e.to_string(),
    })?;
    screen.select(field, &location_id)?;
    after_action(&state, id, &screen, &headers)
}

async fn submit<B: Backend>(
    State(state): State<AppState<B>>,
    headers: HeaderMap,
    Path(id): Path<ScreenId>,
) -> Result<Response, WebError> {
    let screen = find_screen(&state, id).await?;
    // The search task completes into the screen on its own
    let submitted = screen.submit().is_some();

    if accepts_html(&headers) {
        return Ok(Redirect::to(&screen_url(id)).into_response());
    }

    let view = screen.view();
    Ok(Json(SubmitResponse {
        submitted,
        screen: ScreenResponse::from_view(id, &view),
    })
    .into_response())
}

async fn clear<B: Backend>(
    State(state): State<AppState<B>>,
    headers: HeaderMap,
    Path(id): Path<ScreenId>,
) -> Result<Response, WebError> {
    let screen = find_screen(&state, id).await?;
    screen.clear();
    after_action(&state, id, &screen, &headers)
}

/// Stateless autocomplete over the catalog.
async fn search_locations<B: Backend>(
    State(state): State<AppState<B>>,
    Query(req): Query<LocationSearchRequest>,
) -> Json<LocationSearchResponse> {
    let limit = req
        .limit
        .unwrap_or(DEFAULT_LOCATION_LIMIT)
        .min(MAX_LOCATION_LIMIT);
    let snapshot = state.catalog.snapshot();

    let locations = matching(snapshot.locations(), &req.q)
        .take(limit)
        .map(LocationResult::from)
        .collect();

    Json(LocationSearchResponse { locations })
}

/// Reload the catalog from the backend.
async fn reload_catalog<B: Backend>(
    State(state): State<AppState<B>>,
) -> Result<Json<ReloadResponse>, WebError> {
    let outcome = state.catalog.load(state.backend.as_ref()).await?;
    let snapshot = state.catalog.snapshot();

    Ok(Json(ReloadResponse {
        locations: snapshot.len(),
        loaded_at: snapshot.loaded_at(),
        superseded: outcome == LoadOutcome::Superseded,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum WebError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<SelectError> for WebError {
    fn from(e: SelectError) -> Self {
        WebError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<CatalogError> for WebError {
    fn from(e: CatalogError) -> Self {
        WebError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WebError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            WebError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            WebError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            WebError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
