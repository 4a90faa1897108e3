//! Route types returned by the search backend.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::location::RegionKey;

/// Backend-assigned route identifier.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    /// Create a route ID. Empty strings are rejected.
    pub fn new(s: impl Into<String>) -> Result<Self, DomainError> {
        let s = s.into();
        if s.is_empty() {
            return Err(DomainError::EmptyId("route"));
        }
        Ok(RouteId(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A route between two regions, as ranked by the backend.
///
/// Price carries no currency. Direct segments are the named legs (for
/// example "flight", "bus") that make up the route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub origin_key: RegionKey,
    pub destination_key: RegionKey,
    pub price: f64,
    pub duration_minutes: u32,
    pub direct_segments: BTreeSet<String>,
}

impl Route {
    /// Create a route, rejecting prices that are negative or not finite.
    ///
    /// A price of `-0.0` is stored as `0.0`.
    pub fn new(
        id: RouteId,
        origin_key: RegionKey,
        destination_key: RegionKey,
        price: f64,
        duration_minutes: u32,
        direct_segments: impl IntoIterator<Item = String>,
    ) -> Result<Self, DomainError> {
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidPrice {
                id: id.as_str().to_string(),
                price,
            });
        }
        Ok(Self {
            id,
            origin_key,
            destination_key,
            price: if price == 0.0 { 0.0 } else { price },
            duration_minutes,
            direct_segments: direct_segments.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RouteId {
        RouteId::new(s).unwrap()
    }

    #[test]
    fn new_valid_route() {
        let route = Route::new(
            id("r1"),
            RegionKey::new(7),
            RegionKey::new(42),
            120.0,
            95,
            vec!["bus".to_string(), "flight".to_string(), "bus".to_string()],
        )
        .unwrap();

        assert_eq!(route.price, 120.0);
        assert_eq!(route.duration_minutes, 95);
        // Duplicate segments collapse
        assert_eq!(route.direct_segments.len(), 2);
    }

    #[test]
    fn reject_bad_prices() {
        for price in [-1.0, f64::NAN, f64::INFINITY] {
            let result = Route::new(
                id("r1"),
                RegionKey::new(1),
                RegionKey::new(2),
                price,
                10,
                Vec::new(),
            );
            assert!(result.is_err(), "price {price} should be rejected");
        }
    }

    #[test]
    fn zero_price_is_valid() {
        assert!(Route::new(id("r"), RegionKey::new(1), RegionKey::new(2), 0.0, 0, Vec::new()).is_ok());
    }

    #[test]
    fn negative_zero_price_is_normalised() {
        let route =
            Route::new(id("r"), RegionKey::new(1), RegionKey::new(2), -0.0, 0, Vec::new()).unwrap();
        assert!(route.price.is_sign_positive());
    }

    #[test]
    fn reject_empty_route_id() {
        assert_eq!(RouteId::new(""), Err(DomainError::EmptyId("route")));
    }
}
