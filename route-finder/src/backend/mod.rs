//! Route search backend client.
//!
//! Speaks one fixed JSON contract:
//!
//! - `GET  {base}/locations` returns `[{ id, name, regionKey }]`
//! - `POST {base}/search` with `{ originKey, destinationKey }` returns
//!   `{ routes: [{ id, originKey, destinationKey, price, durationMinutes, directSegments }] }`
//!
//! Historical field-name variants (`from`/`to`, `from_location`/`to_location`,
//! `country_id`) are not accepted.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{BackendClient, BackendConfig, DEFAULT_BASE_URL};
pub use convert::{convert_locations, convert_routes};
pub use error::BackendError;
pub use mock::MockBackend;
pub use types::{LocationDto, RouteDto, RoutesResponse, SearchBody};
