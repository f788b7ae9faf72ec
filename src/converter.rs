use crate::geometry::resolve_way;
use crate::osm::{ElementRef, OsmNode, OsmWay, Tags};
use crate::store::ElementStore;
use anyhow::{Context, Result};
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use rayon::prelude::*;
use tracing::debug;

fn tags_to_properties(tags: &Tags) -> JsonObject {
    tags.iter()
        .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
        .collect()
}

fn feature(id: i64, tags: &Tags, value: Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: Some(Id::Number(id.into())),
        properties: Some(tags_to_properties(tags)),
        foreign_members: None,
    }
}

/// Point feature at `[lon, lat]` carrying the node's tags as properties.
pub fn node_feature(node: &OsmNode) -> Feature {
    feature(node.id, &node.tags, Value::Point(vec![node.lon, node.lat]))
}

/// LineString feature from the way's resolved node positions.
///
/// The line may be shorter than the way, or empty, when nodes are missing
/// from the store; the feature is still produced.
pub fn way_feature(store: &ElementStore, way: &OsmWay) -> Feature {
    let line = resolve_way(store, way);
    feature(way.id, &way.tags, Value::LineString(line.positions))
}

fn element_feature(store: &ElementStore, element: &ElementRef<'_>) -> Option<Feature> {
    match *element {
        ElementRef::Node(node) => Some(node_feature(node)),
        ElementRef::Way(way) => Some(way_feature(store, way)),
        ElementRef::Relation(relation) => {
            debug!("Relation {} has no GeoJSON representation, skipping", relation.id);
            None
        }
    }
}

/// Convert store lookups into a FeatureCollection.
///
/// Features come out in the same order as `elements`. Callers pass a single
/// kind per call, as returned by [`ElementStore::find_by_railway_tag`].
pub fn to_feature_collection(store: &ElementStore, elements: &[ElementRef<'_>]) -> FeatureCollection {
    let features: Vec<Feature> = elements
        .par_iter()
        .filter_map(|element| element_feature(store, element))
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

pub fn render(collection: &FeatureCollection, pretty_print: bool) -> Result<String> {
    if pretty_print {
        serde_json::to_string_pretty(collection).context("Failed to serialize FeatureCollection")
    } else {
        serde_json::to_string(collection).context("Failed to serialize FeatureCollection")
    }
}
