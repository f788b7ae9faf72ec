use crate::osm::OsmWay;
use crate::store::ElementStore;
use geojson::Position;
use tracing::warn;

/// Line geometry of a way, plus the node references that could not be found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedLine {
    pub positions: Vec<Position>,
    pub missing: Vec<i64>,
}

impl ResolvedLine {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Resolve a way's node references to `[lon, lat]` positions in way order.
///
/// Extracts are cut at a boundary, so a way may reference nodes that were
/// never loaded. Those references are skipped and logged; the remaining
/// positions keep their relative order.
pub fn resolve_way(store: &ElementStore, way: &OsmWay) -> ResolvedLine {
    let mut line = ResolvedLine {
        positions: Vec::with_capacity(way.node_refs.len()),
        missing: Vec::new(),
    };

    for &node_id in &way.node_refs {
        match store.node(node_id) {
            Some(node) => line.positions.push(vec![node.lon, node.lat]),
            None => line.missing.push(node_id),
        }
    }

    if !line.is_complete() {
        warn!(
            way_id = way.id,
            "Way {} references {} missing node(s): {:?}",
            way.id,
            line.missing.len(),
            line.missing
        );
    }

    line
}
