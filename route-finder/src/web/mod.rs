//! Web layer for the route finder.
//!
//! Hosts search screens for browsers: each page load opens a screen whose
//! fields, selections and searches live server-side until it goes idle.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::{AppState, Backend, ScreenId, ScreenRegistry, ScreenRegistryConfig};
