//! Plain-data graph snapshot consumed by the analysis engine.
//!
//! The surrounding application owns persistence; it hands the engine an
//! ordered node list and an edge list. Only `id`, `source`, `target`,
//! `weight` and `confidence` are ever read. Every other field lands in an
//! attribute bag and is written back out unchanged on serialization.
//!
//! Node order matters: it is the tie-break order for every ranked output.

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SnapshotError;

/// Weight assumed for edges that carry none.
pub const DEFAULT_EDGE_WEIGHT: f64 = 0.5;

/// An entity in the investigation graph (actor, source, event, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Caller-defined fields, passed through untouched.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Node {
    /// A node with no attributes.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }
}

/// How sure the analyst is that a link exists.
///
/// Serialized as the raw tag string; anything other than `CONFIRMED` or
/// `SUSPECTED` is kept verbatim in [`Confidence::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Confidence {
    Confirmed,
    Suspected,
    Other(String),
}

impl From<String> for Confidence {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "CONFIRMED" => Self::Confirmed,
            "SUSPECTED" => Self::Suspected,
            _ => Self::Other(raw),
        }
    }
}

impl From<Confidence> for String {
    fn from(c: Confidence) -> Self {
        match c {
            Confidence::Confirmed => "CONFIRMED".to_string(),
            Confidence::Suspected => "SUSPECTED".to_string(),
            Confidence::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => f.write_str("CONFIRMED"),
            Self::Suspected => f.write_str("SUSPECTED"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// A directed link `source → target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// Caller-defined fields, passed through untouched.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Edge {
    /// An unweighted, untagged edge.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: None,
            confidence: None,
            attributes: Map::new(),
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// The edge weight, falling back to [`DEFAULT_EDGE_WEIGHT`].
    #[must_use]
    pub fn weight_or_default(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_EDGE_WEIGHT)
    }
}

/// A full node/edge snapshot as exported by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Decode a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] if the JSON is malformed or a
    /// required field (`id`, `source`, `target`) is missing.
    pub fn from_json_str(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Decode a snapshot from any reader (stdin, a file, a socket buffer).
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] on malformed input.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read and decode a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Read`] if the file cannot be read and
    /// [`SnapshotError::Parse`] if its contents are not a snapshot.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            nodes = snapshot.nodes.len(),
            edges = snapshot.edges.len(),
            "loaded graph snapshot"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_survive_round_trip() {
        let raw = r#"{
            "nodes": [{"id": "A", "label": "Actor A", "kind": "person"}],
            "edges": [{"source": "A", "target": "A", "note": "self"}]
        }"#;
        let snapshot = GraphSnapshot::from_json_str(raw).expect("parse");
        assert_eq!(snapshot.nodes[0].attributes["label"], "Actor A");
        assert_eq!(snapshot.edges[0].attributes["note"], "self");

        let back = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(back["nodes"][0]["kind"], "person");
        assert_eq!(back["edges"][0]["note"], "self");
        assert!(back["edges"][0].get("weight").is_none());
    }

    #[test]
    fn confidence_tags_parse() {
        let raw = r#"{"nodes": [], "edges": [
            {"source": "A", "target": "B", "confidence": "CONFIRMED"},
            {"source": "A", "target": "B", "confidence": "SUSPECTED", "weight": 0.9},
            {"source": "A", "target": "B", "confidence": "RUMOURED"}
        ]}"#;
        let snapshot = GraphSnapshot::from_json_str(raw).expect("parse");
        assert_eq!(snapshot.edges[0].confidence, Some(Confidence::Confirmed));
        assert_eq!(snapshot.edges[1].confidence, Some(Confidence::Suspected));
        assert_eq!(
            snapshot.edges[2].confidence,
            Some(Confidence::Other("RUMOURED".to_string()))
        );
        let tag = snapshot.edges[2].confidence.as_ref().map(ToString::to_string);
        assert_eq!(tag.as_deref(), Some("RUMOURED"));
    }

    #[test]
    fn missing_weight_defaults() {
        let edge = Edge::new("A", "B");
        assert!((edge.weight_or_default() - 0.5).abs() < f64::EPSILON);
        let edge = edge.with_weight(0.9);
        assert!((edge.weight_or_default() - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_arrays_default_to_empty() {
        let snapshot = GraphSnapshot::from_json_str("{}").expect("parse");
        assert!(snapshot.nodes.is_empty());
        assert!(snapshot.edges.is_empty());
    }

    #[test]
    fn edge_without_target_is_rejected() {
        let err = GraphSnapshot::from_json_str(r#"{"edges": [{"source": "A"}]}"#)
            .expect_err("target is required");
        assert!(matches!(err, SnapshotError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = GraphSnapshot::load(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, SnapshotError::Read { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("graph.json");
        std::fs::write(&path, r#"{"nodes":[{"id":"X"}],"edges":[]}"#).expect("write");
        let snapshot = GraphSnapshot::load(&path).expect("load");
        assert_eq!(snapshot.nodes, vec![Node::new("X")]);
    }
}
