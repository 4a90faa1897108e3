//! Conversion from wire DTOs to domain types.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::{DomainError, Location, RegionKey, Route, RouteId};

use super::types::{LocationDto, RouteDto};

/// Convert a location feed into catalog order.
///
/// Entries the domain rejects (empty ID, blank name) are skipped, as are
/// repeated IDs after their first occurrence. Feed order is preserved.
pub fn convert_locations(dtos: Vec<LocationDto>) -> Vec<Location> {
    let mut seen = HashSet::with_capacity(dtos.len());
    let mut locations = Vec::with_capacity(dtos.len());

    for dto in dtos {
        let location = match Location::new(dto.id, dto.name, RegionKey::new(dto.region_key)) {
            Ok(location) => location,
            Err(e) => {
                warn!("skipping location: {e}");
                continue;
            }
        };

        if !seen.insert(location.id().clone()) {
            warn!("skipping duplicate location ID {}", location.id());
            continue;
        }

        locations.push(location);
    }

    locations
}

/// Convert a route list, preserving backend order.
///
/// Unlike locations, a single bad route rejects the whole list: the
/// backend's ranking is only meaningful for the list as sent.
pub fn convert_routes(dtos: Vec<RouteDto>) -> Result<Vec<Route>, DomainError> {
    dtos.into_iter().map(convert_route).collect()
}

fn convert_route(dto: RouteDto) -> Result<Route, DomainError> {
    Route::new(
        RouteId::new(dto.id)?,
        RegionKey::new(dto.origin_key),
        RegionKey::new(dto.destination_key),
        dto.price,
        dto.duration_minutes,
        dto.direct_segments,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(id: &str, name: &str, key: u64) -> LocationDto {
        LocationDto {
            id: id.to_string(),
            name: name.to_string(),
            region_key: key,
        }
    }

    fn route(id: &str, price: f64) -> RouteDto {
        RouteDto {
            id: id.to_string(),
            origin_key: 7,
            destination_key: 42,
            price,
            duration_minutes: 95,
            direct_segments: vec!["flight".to_string()],
        }
    }

    #[test]
    fn locations_keep_feed_order() {
        let locations = convert_locations(vec![
            loc("2", "Warsaw", 20),
            loc("1", "Kyiv", 10),
            loc("3", "Krakow", 20),
        ]);
        let names: Vec<_> = locations.iter().map(|l| l.display_name()).collect();
        assert_eq!(names, vec!["Warsaw", "Kyiv", "Krakow"]);
    }

    #[test]
    fn locations_skip_invalid_entries() {
        let locations = convert_locations(vec![
            loc("1", "Kyiv", 10),
            loc("", "Nowhere", 11),
            loc("2", "   ", 12),
            loc("3", "Lviv", 13),
        ]);
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[1].display_name(), "Lviv");
    }

    #[test]
    fn locations_keep_first_duplicate() {
        let locations = convert_locations(vec![loc("1", "Kyiv", 10), loc("1", "Kiev", 99)]);
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].display_name(), "Kyiv");
        assert_eq!(locations[0].region_key(), RegionKey::new(10));
    }

    #[test]
    fn routes_keep_backend_order() {
        let routes = convert_routes(vec![route("b", 300.0), route("a", 100.0)]).unwrap();
        assert_eq!(routes[0].id.as_str(), "b");
        assert_eq!(routes[1].id.as_str(), "a");
    }

    #[test]
    fn one_bad_route_rejects_list() {
        let result = convert_routes(vec![route("a", 100.0), route("b", -5.0)]);
        assert!(matches!(result, Err(DomainError::InvalidPrice { .. })));

        let result = convert_routes(vec![route("", 100.0)]);
        assert_eq!(result, Err(DomainError::EmptyId("route")));
    }

    #[test]
    fn empty_route_list_is_valid() {
        assert_eq!(convert_routes(Vec::new()), Ok(Vec::new()));
    }
}
