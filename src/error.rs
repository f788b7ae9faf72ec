use crate::osm::ElementKind;
use std::path::PathBuf;

/// Errors raised while reading the source extract at startup.
///
/// All of these are fatal: the server refuses to start serving without data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Source document has no \"elements\" array")]
    MissingElements,
    #[error("Invalid {kind} at element index {index}: {source}")]
    InvalidElement {
        index: usize,
        kind: ElementKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to read PBF extract: {0}")]
    Pbf(#[from] osmpbf::Error),
}
