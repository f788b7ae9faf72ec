use railway_server::*;
use std::collections::HashMap;

fn railway_tags(value: &str) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    tags.insert("railway".to_string(), value.to_string());
    tags
}

fn sample_store() -> ElementStore {
    ElementStore::from_elements(vec![
        OsmElement::Node(OsmNode {
            id: 5,
            lat: 51.5,
            lon: -0.1,
            tags: railway_tags("station"),
        }),
        OsmElement::Node(OsmNode {
            id: 6,
            lat: 51.6,
            lon: -0.2,
            tags: railway_tags("signal"),
        }),
        OsmElement::Node(OsmNode {
            id: 7,
            lat: 51.7,
            lon: -0.3,
            tags: railway_tags("station"),
        }),
        OsmElement::Way(OsmWay {
            id: 5,
            node_refs: vec![5, 6, 7],
            tags: railway_tags("rail"),
        }),
        OsmElement::Relation(OsmRelation {
            id: 5,
            members: vec![],
            tags: railway_tags("station"),
        }),
    ])
}

#[test]
fn test_counts() {
    let store = sample_store();
    assert_eq!(
        store.counts(),
        StoreCounts {
            nodes: 3,
            ways: 1,
            relations: 1
        }
    );
}

#[test]
fn test_find_by_railway_tag_preserves_insertion_order() {
    let store = sample_store();

    let stations: Vec<i64> = store
        .find_by_railway_tag(ElementKind::Node, "station")
        .iter()
        .map(|e| e.id())
        .collect();
    assert_eq!(stations, vec![5, 7]);
}

#[test]
fn test_find_by_railway_tag_is_kind_scoped() {
    let store = sample_store();

    let rails = store.find_by_railway_tag(ElementKind::Way, "rail");
    assert_eq!(rails.len(), 1);
    assert_eq!(rails[0].kind(), ElementKind::Way);

    assert!(store.find_by_railway_tag(ElementKind::Way, "station").is_empty());
    assert!(store.find_by_railway_tag(ElementKind::Node, "rail").is_empty());
    assert_eq!(store.find_by_railway_tag(ElementKind::Relation, "station").len(), 1);
}

#[test]
fn test_kind_isolation_for_shared_ids() {
    let store = sample_store();

    let node = store.find_by_id(ElementKind::Node, 5).expect("node 5");
    let way = store.find_by_id(ElementKind::Way, 5).expect("way 5");
    let relation = store.find_by_id(ElementKind::Relation, 5).expect("relation 5");

    assert!(matches!(node, ElementRef::Node(n) if n.lat == 51.5));
    assert!(matches!(way, ElementRef::Way(w) if w.node_refs == vec![5, 6, 7]));
    assert!(matches!(relation, ElementRef::Relation(_)));

    assert_eq!(node.railway(), Some("station"));
    assert_eq!(way.railway(), Some("rail"));
    assert!(store.find_by_id(ElementKind::Way, 6).is_none());
}

#[test]
fn test_untagged_elements_are_stored_but_unreachable() {
    let store = ElementStore::from_elements(vec![OsmElement::Node(OsmNode {
        id: 1,
        lat: 0.0,
        lon: 0.0,
        tags: HashMap::new(),
    })]);

    assert!(store.node(1).is_some());
    for entry in catalog::entries() {
        assert!(store.find_by_railway_tag(entry.kind, entry.value).is_empty());
    }
}

#[test]
fn test_uncataloged_values_are_indexed() {
    let store = ElementStore::from_elements(vec![OsmElement::Way(OsmWay {
        id: 1,
        node_refs: vec![],
        tags: railway_tags("funicular"),
    })]);

    assert!(catalog::entries().all(|entry| entry.value != "funicular"));
    assert_eq!(store.ways_by_railway("funicular").count(), 1);
}
