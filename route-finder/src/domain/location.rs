//! Location types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Fold a name or typed prefix for case-insensitive comparison.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Opaque location identifier, unique within one catalog snapshot.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    /// Create a location ID. Empty strings are rejected.
    pub fn new(s: impl Into<String>) -> Result<Self, DomainError> {
        let s = s.into();
        if s.is_empty() {
            return Err(DomainError::EmptyId("location"));
        }
        Ok(LocationId(s))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationId({})", self.0)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier the search backend uses for a location's region.
///
/// Several locations may share a region key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionKey(u64);

impl RegionKey {
    pub const fn new(key: u64) -> Self {
        RegionKey(key)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionKey({})", self.0)
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A known location that can be used as a search endpoint.
///
/// # Examples
///
/// ```
/// use route_finder::domain::{Location, RegionKey};
///
/// let kyiv = Location::new("1", "Kyiv", RegionKey::new(10)).unwrap();
/// assert_eq!(kyiv.display_name(), "Kyiv");
///
/// // Blank names are rejected
/// assert!(Location::new("2", "  ", RegionKey::new(11)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    id: LocationId,
    display_name: String,
    /// Lowercased display name, used for case-insensitive matching
    folded_name: String,
    region_key: RegionKey,
}

impl Location {
    /// Create a location, validating the ID and trimming the display name.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        region_key: RegionKey,
    ) -> Result<Self, DomainError> {
        let id = LocationId::new(id)?;
        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(DomainError::EmptyDisplayName(id.into_string()));
        }
        Ok(Self {
            id,
            folded_name: fold(&display_name),
            display_name,
            region_key,
        })
    }

    pub fn id(&self) -> &LocationId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn region_key(&self) -> RegionKey {
        self.region_key
    }

    /// The display name passed through [`fold`].
    pub fn folded_name(&self) -> &str {
        &self.folded_name
    }
}
