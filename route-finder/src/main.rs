use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use route_finder::backend::{BackendClient, BackendConfig, DEFAULT_BASE_URL, MockBackend};
use route_finder::catalog::LocationCatalog;
use route_finder::search::SearchConfig;
use route_finder::web::{AppState, Backend, ScreenRegistryConfig, create_router};

/// How often to retry loading locations while the catalog is empty.
const CATALOG_RETRY_INTERVAL: Duration = Duration::from_secs(60);

/// How often to refresh locations once loaded (24 hours).
const CATALOG_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_finder=info,tower_http=info")),
        )
        .init();

    // Backend base URL is the only setting read from the environment.
    // A file:// URL names a directory of mock data instead.
    let base_url = std::env::var("ROUTES_API_URL").unwrap_or_else(|_| {
        warn!("ROUTES_API_URL not set, using {DEFAULT_BASE_URL}");
        DEFAULT_BASE_URL.to_string()
    });

    if let Some(data_dir) = base_url.strip_prefix("file://") {
        match MockBackend::from_dir(data_dir) {
            Ok(mock) => {
                info!("serving mock data from {data_dir}");
                serve(mock).await;
            }
            Err(e) => {
                error!("failed to load mock data from {data_dir}: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    match BackendClient::new(BackendConfig::new(&base_url)) {
        Ok(client) => {
            info!("fetching locations from {}", client.base_url());
            serve(client).await;
        }
        Err(e) => {
            error!("failed to create backend client: {e}");
            std::process::exit(1);
        }
    }
}

async fn serve<B: Backend>(backend: B) {
    // A failed first load is not fatal: screens work once a retry succeeds
    let catalog = LocationCatalog::new();
    if let Err(e) = catalog.load(&backend).await {
        warn!("starting with an empty catalog: {e}");
    }

    let state = AppState::new(
        catalog,
        backend,
        SearchConfig::default(),
        &ScreenRegistryConfig::default(),
    );

    // Retry while empty, then refresh daily
    let refresh_state = state.clone();
    tokio::spawn(async move {
        loop {
            let wait = if refresh_state.catalog.snapshot().is_empty() {
                CATALOG_RETRY_INTERVAL
            } else {
                CATALOG_REFRESH_INTERVAL
            };
            tokio::time::sleep(wait).await;
            // Outcome and errors are logged by the catalog
            let _ = refresh_state
                .catalog
                .load(refresh_state.backend.as_ref())
                .await;
        }
    });

    let app = create_router(state, concat!(env!("CARGO_MANIFEST_DIR"), "/static"));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Route Finder listening on http://{addr}");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
