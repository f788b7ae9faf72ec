// Reading the startup extract into OSM elements
use crate::error::LoadError;
use crate::osm::{
    ElementKind, MemberType, OsmElement, OsmNode, OsmRelation, OsmRelationMember, OsmWay, Tags,
};
use osmpbf::{Element, ElementReader};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Deserialize)]
struct RawDocument {
    elements: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct RawNode {
    id: i64,
    #[serde(deserialize_with = "deserialize_coordinate")]
    lat: f64,
    #[serde(deserialize_with = "deserialize_coordinate")]
    lon: f64,
    #[serde(default, deserialize_with = "deserialize_tags")]
    tags: Tags,
}

#[derive(Deserialize)]
struct RawWay {
    id: i64,
    #[serde(default)]
    nodes: Vec<i64>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    tags: Tags,
}

#[derive(Deserialize)]
struct RawRelation {
    id: i64,
    #[serde(default)]
    members: Vec<RawMember>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    tags: Tags,
}

#[derive(Deserialize)]
struct RawMember {
    #[serde(rename = "type")]
    member_type: MemberType,
    #[serde(rename = "ref")]
    member_id: i64,
    #[serde(default)]
    role: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
}

/// Accepts `51.5` as well as `"51.5"`; Overpass dumps use both.
/// `NaN`, infinities and out-of-range values are rejected.
fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawCoordinate::deserialize(deserializer)? {
        RawCoordinate::Number(value) => value,
        RawCoordinate::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid coordinate {text:?}: {e}")))?,
    };

    if !value.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "coordinate {value} is not a finite number"
        )));
    }
    Ok(value)
}

/// Tag values are strings in well-formed extracts, but numbers and booleans
/// do turn up. They are kept in their textual form; nulls are dropped.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Tags, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((key, text)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

/// Parse an OSM JSON document of the form `{ "elements": [...] }`.
///
/// Records with an unknown `type` are logged and skipped. A record of a
/// known type that fails to decode aborts the whole load.
pub fn parse_document(json: &str) -> Result<Vec<OsmElement>, LoadError> {
    let document: RawDocument = serde_json::from_str(json)?;
    let raw_elements = document.elements.ok_or(LoadError::MissingElements)?;

    let mut elements = Vec::with_capacity(raw_elements.len());
    for (index, raw) in raw_elements.into_iter().enumerate() {
        let type_name = raw.get("type").and_then(Value::as_str).unwrap_or("");
        let Some(kind) = ElementKind::from_type_name(type_name) else {
            warn!("Do not recognise element type {:?} at index {}", type_name, index);
            continue;
        };

        let invalid = |source| LoadError::InvalidElement {
            index,
            kind,
            source,
        };
        let element = match kind {
            ElementKind::Node => {
                let node: RawNode = serde_json::from_value(raw).map_err(invalid)?;
                OsmElement::Node(OsmNode {
                    id: node.id,
                    lat: node.lat,
                    lon: node.lon,
                    tags: node.tags,
                })
            }
            ElementKind::Way => {
                let way: RawWay = serde_json::from_value(raw).map_err(invalid)?;
                OsmElement::Way(OsmWay {
                    id: way.id,
                    node_refs: way.nodes,
                    tags: way.tags,
                })
            }
            ElementKind::Relation => {
                let relation: RawRelation = serde_json::from_value(raw).map_err(invalid)?;
                OsmElement::Relation(OsmRelation {
                    id: relation.id,
                    members: relation
                        .members
                        .into_iter()
                        .map(|member| OsmRelationMember {
                            member_type: member.member_type,
                            member_id: member.member_id,
                            role: member.role,
                        })
                        .collect(),
                    tags: relation.tags,
                })
            }
        };
        elements.push(element);
    }

    Ok(elements)
}

pub fn load_json_file(path: &Path) -> Result<Vec<OsmElement>, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&json)
}

/// Read an `.osm.pbf` extract in file order.
pub fn load_pbf_file(path: &Path) -> Result<Vec<OsmElement>, LoadError> {
    let reader = ElementReader::from_path(path)?;
    let mut elements = Vec::new();
    reader.for_each(|element| elements.push(convert_pbf_element(element)))?;
    Ok(elements)
}

/// Load an extract, picking the decoder from the file extension.
pub fn load_path(path: &Path) -> Result<Vec<OsmElement>, LoadError> {
    let is_pbf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pbf"));

    info!("Reading {} extract from {}", if is_pbf { "PBF" } else { "JSON" }, path.display());
    if is_pbf {
        load_pbf_file(path)
    } else {
        load_json_file(path)
    }
}

fn convert_pbf_element(element: Element) -> OsmElement {
    match element {
        Element::Node(node) => OsmElement::Node(OsmNode {
            id: node.id(),
            lat: node.lat(),
            lon: node.lon(),
            tags: node
                .tags()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }),
        Element::DenseNode(dense_node) => OsmElement::Node(OsmNode {
            id: dense_node.id(),
            lat: dense_node.lat(),
            lon: dense_node.lon(),
            tags: dense_node
                .tags()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }),
        Element::Way(way) => OsmElement::Way(OsmWay {
            id: way.id(),
            node_refs: way.refs().collect(),
            tags: way
                .tags()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }),
        Element::Relation(relation) => {
            let members = relation
                .members()
                .map(|member| {
                    let member_type = match member.member_type {
                        osmpbf::RelMemberType::Node => MemberType::Node,
                        osmpbf::RelMemberType::Way => MemberType::Way,
                        osmpbf::RelMemberType::Relation => MemberType::Relation,
                    };
                    OsmRelationMember {
                        member_type,
                        member_id: member.member_id,
                        role: member.role().unwrap_or("").to_string(),
                    }
                })
                .collect();

            OsmElement::Relation(OsmRelation {
                id: relation.id(),
                members,
                tags: relation
                    .tags()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            })
        }
    }
}
