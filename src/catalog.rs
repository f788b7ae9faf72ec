//! Railway types exposed as HTTP endpoints.
//!
//! The catalog only decides which routes exist. Loading and conversion never
//! consult it: an element whose `railway` value is not listed here is stored
//! like any other, it just has no endpoint.

use crate::osm::ElementKind;
use std::collections::HashSet;

/// `railway` values served for nodes.
pub const NODE_RAILWAY_TYPES: &[&str] = &[
    "station",
    "level_crossing",
    "stop",
    "subway_entrance",
    "junction",
    "switch",
    "buffer_stop",
    "crossing",
    "railway_crossing",
    "loading_ramp",
    "signal",
    "platform",
    "station_site",
    "entrance",
    "train station entrance",
    "train_station_entrance",
    "disused",
    "disused_station",
    "owner_change",
    "waiting_room",
    "stop_position",
    "ventilation_shaft",
    "power_supply",
    "construction",
    "station_entrance",
    "yes",
];

/// `railway` values served for ways.
pub const WAY_RAILWAY_TYPES: &[&str] = &["subway", "rail", "platform", "razed", "light_rail"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    pub kind: ElementKind,
    pub value: &'static str,
}

/// Node entries first, then way entries.
pub fn entries() -> impl Iterator<Item = CatalogEntry> {
    let nodes = NODE_RAILWAY_TYPES.iter().map(|&value| CatalogEntry {
        kind: ElementKind::Node,
        value,
    });
    let ways = WAY_RAILWAY_TYPES.iter().map(|&value| CatalogEntry {
        kind: ElementKind::Way,
        value,
    });
    nodes.chain(ways)
}

/// Percent-encode the characters that may appear in a catalog value but not
/// in a URI path segment.
fn encode_segment(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' => encoded.push_str("%20"),
            '/' => encoded.push_str("%2F"),
            '?' => encoded.push_str("%3F"),
            '#' => encoded.push_str("%23"),
            '%' => encoded.push_str("%25"),
            _ => encoded.push(c),
        }
    }
    encoded
}

/// Bare endpoint path, e.g. `/station` or `/train%20station%20entrance`.
pub fn endpoint_path(value: &str) -> String {
    format!("/{}", encode_segment(value))
}

/// Kind-qualified endpoint path, e.g. `/way/platform`.
pub fn qualified_path(entry: &CatalogEntry) -> String {
    format!("/{}/{}", entry.kind.as_str(), encode_segment(entry.value))
}

/// Bare endpoints, one per distinct value. `platform` is listed for both
/// kinds; the node entry owns `/platform` and the way entry is reachable at
/// `/way/platform` only.
pub fn endpoints() -> Vec<(String, CatalogEntry)> {
    let mut seen = HashSet::new();
    entries()
        .filter(|entry| seen.insert(entry.value))
        .map(|entry| (endpoint_path(entry.value), entry))
        .collect()
}

/// Bare endpoints shadowed by an earlier entry with the same value.
pub fn shadowed() -> Vec<CatalogEntry> {
    let mut seen = HashSet::new();
    entries().filter(|entry| !seen.insert(entry.value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_prefers_node() {
        let (_, entry) = endpoints()
            .into_iter()
            .find(|(path, _)| path == "/platform")
            .unwrap();
        assert_eq!(entry.kind, ElementKind::Node);

        let shadowed = shadowed();
        assert_eq!(
            shadowed,
            vec![CatalogEntry {
                kind: ElementKind::Way,
                value: "platform"
            }]
        );
    }

    #[test]
    fn test_endpoint_paths_are_unique() {
        let endpoints = endpoints();
        let paths: HashSet<&str> = endpoints.iter().map(|(path, _)| path.as_str()).collect();
        assert_eq!(paths.len(), endpoints.len());
        assert_eq!(
            endpoints.len(),
            NODE_RAILWAY_TYPES.len() + WAY_RAILWAY_TYPES.len() - 1
        );
    }

    #[test]
    fn test_spaces_are_encoded() {
        assert_eq!(
            endpoint_path("train station entrance"),
            "/train%20station%20entrance"
        );
        assert_eq!(endpoint_path("station"), "/station");
        let entry = CatalogEntry {
            kind: ElementKind::Way,
            value: "rail",
        };
        assert_eq!(qualified_path(&entry), "/way/rail");
    }

    #[test]
    fn test_unknown_value_has_no_endpoint() {
        assert!(entries().all(|entry| entry.value != "depot"));
    }
}
