use railway_server::*;
use std::collections::HashMap;

fn store_with_nodes(coords: &[(i64, f64, f64)]) -> ElementStore {
    ElementStore::from_elements(coords.iter().map(|&(id, lat, lon)| {
        OsmElement::Node(OsmNode {
            id,
            lat,
            lon,
            tags: HashMap::new(),
        })
    }))
}

fn way(id: i64, node_refs: Vec<i64>) -> OsmWay {
    OsmWay {
        id,
        node_refs,
        tags: HashMap::new(),
    }
}

#[test]
fn test_complete_way_keeps_length() {
    let store = store_with_nodes(&[(1, 51.50, -0.10), (2, 51.51, -0.11), (3, 51.52, -0.12)]);
    let way = way(100, vec![1, 2, 3, 2, 1]);

    let line = resolve_way(&store, &way);

    assert!(line.is_complete());
    assert_eq!(line.positions.len(), way.node_refs.len());
    assert_eq!(line.positions[2], vec![-0.12, 51.52]);
}

#[test]
fn test_dangling_reference_is_skipped() {
    let store = store_with_nodes(&[(1, 51.5, -0.1)]);
    let way = way(3, vec![1, 999]);

    let line = resolve_way(&store, &way);

    assert_eq!(line.positions, vec![vec![-0.1, 51.5]]);
    assert_eq!(line.missing, vec![999]);
}

#[test]
fn test_way_outside_extract_resolves_empty() {
    let store = store_with_nodes(&[]);
    let line = resolve_way(&store, &way(4, vec![10, 11]));

    assert!(line.positions.is_empty());
    assert_eq!(line.missing, vec![10, 11]);
}

#[test]
fn test_way_ids_do_not_resolve_as_nodes() {
    // Way 2 is in the store, but only nodes are coordinate sources.
    let store = ElementStore::from_elements(vec![
        OsmElement::Way(way(2, vec![])),
        OsmElement::Node(OsmNode {
            id: 1,
            lat: 10.0,
            lon: 20.0,
            tags: HashMap::new(),
        }),
    ]);

    let line = resolve_way(&store, &way(5, vec![2, 1]));
    assert_eq!(line.positions, vec![vec![20.0, 10.0]]);
    assert_eq!(line.missing, vec![2]);
}
