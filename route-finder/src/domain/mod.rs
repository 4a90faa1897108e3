//! Domain types for the route finder.
//!
//! Locations and routes are validated when they are built from backend data,
//! so the matcher, coordinator and presenter can trust their invariants.

mod error;
mod location;
mod route;

pub use error::DomainError;
pub use location::{Location, LocationId, RegionKey, fold};
pub use route::{Route, RouteId};
