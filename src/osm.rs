use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Free-form OSM tag bag. Only `railway` carries meaning for this server.
pub type Tags = HashMap<String, String>;

/// Tag key used to classify elements into endpoints.
pub const RAILWAY_TAG: &str = "railway";

#[derive(Debug, Clone, PartialEq)]
pub struct OsmNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OsmWay {
    pub id: i64,
    pub node_refs: Vec<i64>,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OsmRelationMember {
    pub member_type: MemberType,
    pub member_id: i64,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Node,
    Way,
    Relation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OsmRelation {
    pub id: i64,
    pub members: Vec<OsmRelationMember>,
    pub tags: Tags,
}

/// The three element partitions of an extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
        }
    }

    /// Parse the `type` discriminator of a source record.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "node" => Some(ElementKind::Node),
            "way" => Some(ElementKind::Way),
            "relation" => Some(ElementKind::Relation),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OsmElement {
    Node(OsmNode),
    Way(OsmWay),
    Relation(OsmRelation),
}

impl OsmElement {
    pub fn id(&self) -> i64 {
        match self {
            OsmElement::Node(node) => node.id,
            OsmElement::Way(way) => way.id,
            OsmElement::Relation(relation) => relation.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            OsmElement::Node(_) => ElementKind::Node,
            OsmElement::Way(_) => ElementKind::Way,
            OsmElement::Relation(_) => ElementKind::Relation,
        }
    }

    pub fn tags(&self) -> &Tags {
        match self {
            OsmElement::Node(node) => &node.tags,
            OsmElement::Way(way) => &way.tags,
            OsmElement::Relation(relation) => &relation.tags,
        }
    }

    pub fn railway(&self) -> Option<&str> {
        self.tags().get(RAILWAY_TAG).map(String::as_str)
    }
}

/// Borrowed view of an element held by the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementRef<'a> {
    Node(&'a OsmNode),
    Way(&'a OsmWay),
    Relation(&'a OsmRelation),
}

impl<'a> ElementRef<'a> {
    pub fn id(&self) -> i64 {
        match self {
            ElementRef::Node(node) => node.id,
            ElementRef::Way(way) => way.id,
            ElementRef::Relation(relation) => relation.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Node(_) => ElementKind::Node,
            ElementRef::Way(_) => ElementKind::Way,
            ElementRef::Relation(_) => ElementKind::Relation,
        }
    }

    pub fn tags(&self) -> &'a Tags {
        match *self {
            ElementRef::Node(node) => &node.tags,
            ElementRef::Way(way) => &way.tags,
            ElementRef::Relation(relation) => &relation.tags,
        }
    }

    pub fn railway(&self) -> Option<&'a str> {
        self.tags().get(RAILWAY_TAG).map(String::as_str)
    }
}
