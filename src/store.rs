// In-memory element store, built once at startup and read-only afterwards
use crate::osm::{ElementKind, ElementRef, OsmElement, OsmNode, OsmRelation, OsmWay, Tags, RAILWAY_TAG};
use std::collections::HashMap;
use tracing::{debug, info};

trait Indexed {
    fn id(&self) -> i64;
    fn tags(&self) -> &Tags;
}

impl Indexed for OsmNode {
    fn id(&self) -> i64 {
        self.id
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }
}

impl Indexed for OsmWay {
    fn id(&self) -> i64 {
        self.id
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }
}

impl Indexed for OsmRelation {
    fn id(&self) -> i64 {
        self.id
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// One kind's elements, in insertion order, with id and `railway` indices
/// pointing into `elements`.
#[derive(Debug)]
struct Partition<T> {
    elements: Vec<T>,
    by_id: HashMap<i64, usize>,
    by_railway: HashMap<String, Vec<usize>>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            by_id: HashMap::new(),
            by_railway: HashMap::new(),
        }
    }
}

impl<T: Indexed> Partition<T> {
    /// Insert an element. A duplicate id replaces the earlier element in its
    /// original slot (last write wins).
    fn insert(&mut self, element: T) {
        let railway = element.tags().get(RAILWAY_TAG).cloned();

        let existing = self.by_id.get(&element.id()).copied();
        let slot = match existing {
            Some(slot) => {
                debug!("Replacing duplicate element id {}", element.id());
                if let Some(previous) = self.elements[slot].tags().get(RAILWAY_TAG)
                    && let Some(slots) = self.by_railway.get_mut(previous)
                {
                    slots.retain(|&s| s != slot);
                }
                self.elements[slot] = element;
                slot
            }
            None => {
                let slot = self.elements.len();
                self.by_id.insert(element.id(), slot);
                self.elements.push(element);
                slot
            }
        };

        if let Some(value) = railway {
            let slots = self.by_railway.entry(value).or_default();
            // Keep slots sorted so lookups return insertion order.
            let position = slots.partition_point(|&s| s < slot);
            slots.insert(position, slot);
        }
    }

    fn get(&self, id: i64) -> Option<&T> {
        self.by_id.get(&id).map(|&slot| &self.elements[slot])
    }

    fn by_railway(&self, value: &str) -> impl Iterator<Item = &T> + '_ {
        self.by_railway
            .get(value)
            .map(|slots| slots.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&slot| &self.elements[slot])
    }

    fn len(&self) -> usize {
        self.elements.len()
    }
}

/// Element totals per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub nodes: usize,
    pub ways: usize,
    pub relations: usize,
}

/// All elements of an extract, partitioned by kind and indexed by id and by
/// the `railway` tag value.
///
/// Built once with [`ElementStore::load`] (or [`ElementStore::from_elements`])
/// and then shared read-only, typically behind an `Arc`.
#[derive(Debug, Default)]
pub struct ElementStore {
    nodes: Partition<OsmNode>,
    ways: Partition<OsmWay>,
    relations: Partition<OsmRelation>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = OsmElement>,
    {
        let mut store = Self::new();
        store.load(elements);
        store
    }

    /// Insert every element into the partition matching its kind.
    pub fn load<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = OsmElement>,
    {
        for element in elements {
            self.insert(element);
        }

        let counts = self.counts();
        info!(
            "Loaded nodes: {} ways: {} relations: {}",
            counts.nodes, counts.ways, counts.relations
        );
    }

    pub fn insert(&mut self, element: OsmElement) {
        match element {
            OsmElement::Node(node) => self.nodes.insert(node),
            OsmElement::Way(way) => self.ways.insert(way),
            OsmElement::Relation(relation) => self.relations.insert(relation),
        }
    }

    pub fn node(&self, id: i64) -> Option<&OsmNode> {
        self.nodes.get(id)
    }

    pub fn way(&self, id: i64) -> Option<&OsmWay> {
        self.ways.get(id)
    }

    pub fn relation(&self, id: i64) -> Option<&OsmRelation> {
        self.relations.get(id)
    }

    pub fn find_by_id(&self, kind: ElementKind, id: i64) -> Option<ElementRef<'_>> {
        match kind {
            ElementKind::Node => self.node(id).map(ElementRef::Node),
            ElementKind::Way => self.way(id).map(ElementRef::Way),
            ElementKind::Relation => self.relation(id).map(ElementRef::Relation),
        }
    }

    pub fn nodes_by_railway(&self, value: &str) -> impl Iterator<Item = &OsmNode> + '_ {
        self.nodes.by_railway(value)
    }

    pub fn ways_by_railway(&self, value: &str) -> impl Iterator<Item = &OsmWay> + '_ {
        self.ways.by_railway(value)
    }

    /// Every element of `kind` whose `railway` tag equals `value`, in
    /// insertion order. No match yields an empty vector.
    pub fn find_by_railway_tag(&self, kind: ElementKind, value: &str) -> Vec<ElementRef<'_>> {
        match kind {
            ElementKind::Node => self.nodes.by_railway(value).map(ElementRef::Node).collect(),
            ElementKind::Way => self.ways.by_railway(value).map(ElementRef::Way).collect(),
            ElementKind::Relation => self
                .relations
                .by_railway(value)
                .map(ElementRef::Relation)
                .collect(),
        }
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            nodes: self.nodes.len(),
            ways: self.ways.len(),
            relations: self.relations.len(),
        }
    }
}
