//! Prefix autocomplete over the location catalog.

pub use crate::domain::fold;
use crate::domain::Location;

/// Iterate over locations whose name starts with `prefix`, ignoring case.
///
/// An empty prefix matches nothing, so the whole catalog is never offered
/// before the user types. Catalog order is preserved; there is no ranking.
pub fn matching<'a>(
    locations: &'a [Location],
    prefix: &str,
) -> impl Iterator<Item = &'a Location> + use<'a> {
    let folded = fold(prefix);
    let empty = prefix.is_empty();
    locations
        .iter()
        .filter(move |l| !empty && l.folded_name().starts_with(&folded))
}

/// Candidate locations for `prefix`, in catalog order.
///
/// Recomputed on every call; catalogs are small enough that a linear scan
/// per keystroke is cheap.
pub fn matches(locations: &[Location], prefix: &str) -> Vec<Location> {
    matching(locations, prefix).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegionKey;

    fn loc(id: &str, name: &str, key: u64) -> Location {
        Location::new(id, name, RegionKey::new(key)).unwrap()
    }

    fn catalog() -> Vec<Location> {
        vec![
            loc("1", "Kyiv", 10),
            loc("2", "Warsaw", 20),
            loc("3", "Krakow", 20),
            loc("4", "Kyoto", 30),
            loc("5", "Львів", 40),
        ]
    }

    fn names(locations: &[Location]) -> Vec<&str> {
        locations.iter().map(|l| l.display_name()).collect()
    }

    #[test]
    fn empty_prefix_matches_nothing() {
        assert!(matches(&catalog(), "").is_empty());
    }

    #[test]
    fn prefix_matches_in_catalog_order() {
        assert_eq!(names(&matches(&catalog(), "K")), vec!["Kyiv", "Krakow", "Kyoto"]);
        assert_eq!(names(&matches(&catalog(), "Ky")), vec!["Kyiv", "Kyoto"]);
        assert_eq!(names(&matches(&catalog(), "kyi")), vec!["Kyiv"]);
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(names(&matches(&catalog(), "WAR")), vec!["Warsaw"]);
        assert_eq!(names(&matches(&catalog(), "лЬв")), vec!["Львів"]);
    }

    #[test]
    fn no_substring_matches() {
        assert!(matches(&catalog(), "saw").is_empty());
        assert!(matches(&catalog(), "yiv").is_empty());
    }

    #[test]
    fn whitespace_is_significant() {
        assert!(matches(&catalog(), " Ky").is_empty());
    }

    #[test]
    fn empty_catalog() {
        assert!(matches(&[], "Ky").is_empty());
    }

    #[test]
    fn matching_can_be_limited() {
        let catalog = catalog();
        let first: Vec<_> = matching(&catalog, "k").take(2).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].display_name(), "Krakow");
    }
}
