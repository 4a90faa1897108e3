//! Location catalog and autocomplete matching.
//!
//! The catalog holds the location feed fetched from the backend. It is
//! replaced wholesale on each successful load and never edited in place.
//! The matcher maps free text onto catalog entries by name prefix.

mod catalog;
mod error;
mod matcher;

pub use catalog::{CatalogSnapshot, LoadOutcome, LocationCatalog, LocationSource};
pub use error::CatalogError;
pub use matcher::{fold, matches, matching};
