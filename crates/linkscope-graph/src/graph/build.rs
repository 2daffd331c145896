//! Adjacency construction from a node/edge snapshot.
//!
//! # Overview
//!
//! [`AdjacencyList::build`] turns the caller's plain node and edge lists into
//! a [`petgraph`] directed graph. It is the only place the raw edge list is
//! read; every metric, detector and path search works from the structure
//! built here.
//!
//! ## Node Order
//!
//! Nodes are inserted in input order, so `NodeIndex::index()` equals the
//! node's position in the caller's list (after dropping duplicate ids).
//! That index is the tie-break key for all ranked output.
//!
//! ## Edges
//!
//! Edges are kept with their multiplicity: a pair linked twice, or linked in
//! both directions, contributes to degree twice. Self-loops are kept and
//! appear on both the outgoing and incoming side of their node. Edges whose
//! source or target is not a known node id are dropped without error.
//!
//! ## Cache Invalidation
//!
//! [`AdjacencyList::content_hash`] is a BLAKE3 hash of the node order and
//! the sorted retained edge set. It does not depend on edge order.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use linkscope_core::model::{Confidence, Edge, Node};
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument, warn};

// ---------------------------------------------------------------------------
// AdjacencyList
// ---------------------------------------------------------------------------

/// Per-edge data the detectors read. Everything else on the input edge is
/// left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub weight: f64,
    pub confidence: Option<Confidence>,
}

/// Directed adjacency over the snapshot's known nodes.
///
/// Immutable once built. Every input node has an entry, possibly with no
/// edges; no entry exists for an id that was never in the node list.
#[derive(Debug)]
pub struct AdjacencyList {
    /// Directed graph: node weights are node ids, edge weights are [`Link`]s.
    pub graph: DiGraph<String, Link>,
    /// Mapping from node id to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 content hash of node order and retained edges.
    pub content_hash: String,
    /// Input edges ignored because an endpoint was unknown.
    pub dropped_edges: usize,
}

impl AdjacencyList {
    /// Build the adjacency from a snapshot.
    ///
    /// Duplicate node ids keep their first position; later repeats are
    /// ignored. This cannot fail.
    #[must_use]
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn build(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut graph = DiGraph::<String, Link>::with_capacity(nodes.len(), edges.len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            if node_map.contains_key(&node.id) {
                warn!(id = %node.id, "duplicate node id ignored");
                continue;
            }
            let idx = graph.add_node(node.id.clone());
            node_map.insert(node.id.clone(), idx);
        }

        let mut dropped_edges = 0usize;
        for edge in edges {
            let (Some(&source), Some(&target)) =
                (node_map.get(&edge.source), node_map.get(&edge.target))
            else {
                dropped_edges += 1;
                continue;
            };
            graph.add_edge(
                source,
                target,
                Link {
                    weight: edge.weight_or_default(),
                    confidence: edge.confidence.clone(),
                },
            );
        }

        if dropped_edges > 0 {
            debug!(dropped_edges, "edges with unknown endpoints dropped");
        }

        let content_hash = compute_content_hash(&graph);

        Self {
            graph,
            node_map,
            content_hash,
            dropped_edges,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of retained edges (dropped edges excluded).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a node id.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// The id of a node of this graph.
    ///
    /// `idx` must come from this adjacency.
    #[must_use]
    pub fn id(&self, idx: NodeIndex) -> &str {
        self.graph[idx].as_str()
    }

    /// Node indices in input order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Targets of `idx`'s outgoing edges, in edge insertion order.
    #[must_use]
    pub fn outgoing(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.ordered_endpoints(idx, Direction::Outgoing)
    }

    /// Sources of `idx`'s incoming edges, in edge insertion order.
    #[must_use]
    pub fn incoming(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.ordered_endpoints(idx, Direction::Incoming)
    }

    /// `|out(idx)|`.
    #[must_use]
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
    }

    /// `|in(idx)|`.
    #[must_use]
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// Retained edges in input order as `(source, target, link)`.
    pub fn links(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &Link)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    fn ordered_endpoints(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        edges.sort_unstable_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, other)| other).collect()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// BLAKE3 over node ids (in order) and the sorted retained edge set.
fn compute_content_hash(graph: &DiGraph<String, Link>) -> String {
    let mut hasher = blake3::Hasher::new();
    for id in graph.node_weights() {
        hasher.update(b"n\x00");
        hasher.update(id.as_bytes());
        hasher.update(b"\x00");
    }

    let mut edges: Vec<(usize, usize, u64, String)> = graph
        .edge_references()
        .map(|e| {
            let link = e.weight();
            (
                e.source().index(),
                e.target().index(),
                link.weight.to_bits(),
                link.confidence
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            )
        })
        .collect();
    edges.sort_unstable();

    for (source, target, weight_bits, confidence) in &edges {
        hasher.update(b"e\x00");
        hasher.update(&source.to_le_bytes());
        hasher.update(&target.to_le_bytes());
        hasher.update(&weight_bits.to_le_bytes());
        hasher.update(confidence.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id)).collect()
    }

    fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
        pairs.iter().map(|(s, t)| Edge::new(*s, *t)).collect()
    }

    #[test]
    fn empty_snapshot_produces_empty_graph() {
        let adj = AdjacencyList::build(&[], &[]);
        assert_eq!(adj.node_count(), 0);
        assert_eq!(adj.edge_count(), 0);
        assert!(adj.content_hash.starts_with("blake3:"));
    }

    #[test]
    fn nodes_without_edges_have_empty_entries() {
        let adj = AdjacencyList::build(&nodes(&["A", "B"]), &[]);
        assert_eq!(adj.node_count(), 2);
        let a = adj.node_index("A").expect("A node");
        assert!(adj.outgoing(a).is_empty());
        assert!(adj.incoming(a).is_empty());
        assert!(adj.node_index("C").is_none());
    }

    #[test]
    fn node_order_is_preserved() {
        let adj = AdjacencyList::build(&nodes(&["z", "a", "m"]), &[]);
        let ids: Vec<&str> = adj.node_indices().map(|idx| adj.id(idx)).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn edge_direction_is_recorded() {
        let adj = AdjacencyList::build(&nodes(&["A", "B"]), &edges(&[("A", "B")]));
        let a = adj.node_index("A").expect("A node");
        let b = adj.node_index("B").expect("B node");
        assert_eq!(adj.outgoing(a), vec![b]);
        assert_eq!(adj.incoming(b), vec![a]);
        assert!(adj.incoming(a).is_empty());
        assert!(adj.outgoing(b).is_empty());
    }

    #[test]
    fn unknown_endpoints_are_dropped() {
        let adj = AdjacencyList::build(
            &nodes(&["A", "B"]),
            &edges(&[("A", "B"), ("A", "ghost"), ("ghost", "B"), ("x", "y")]),
        );
        assert_eq!(adj.edge_count(), 1);
        assert_eq!(adj.dropped_edges, 3);
        let a = adj.node_index("A").expect("A node");
        assert_eq!(adj.out_degree(a), 1);
        assert!(adj.node_index("ghost").is_none());
    }

    #[test]
    fn self_loop_recorded_on_both_sides() {
        let adj = AdjacencyList::build(&nodes(&["A"]), &edges(&[("A", "A")]));
        let a = adj.node_index("A").expect("A node");
        assert_eq!(adj.outgoing(a), vec![a]);
        assert_eq!(adj.incoming(a), vec![a]);
        assert_eq!(adj.out_degree(a) + adj.in_degree(a), 2);
    }

    #[test]
    fn parallel_edges_keep_multiplicity() {
        let adj = AdjacencyList::build(&nodes(&["A", "B"]), &edges(&[("A", "B"), ("A", "B")]));
        let a = adj.node_index("A").expect("A node");
        assert_eq!(adj.out_degree(a), 2);
        assert_eq!(adj.edge_count(), 2);
    }

    #[test]
    fn outgoing_follows_insertion_order() {
        let adj = AdjacencyList::build(
            &nodes(&["A", "B", "C", "D"]),
            &edges(&[("A", "D"), ("A", "B"), ("A", "C")]),
        );
        let a = adj.node_index("A").expect("A node");
        let ids: Vec<&str> = adj.outgoing(a).into_iter().map(|i| adj.id(i)).collect();
        assert_eq!(ids, vec!["D", "B", "C"]);
    }

    #[test]
    fn duplicate_node_ids_keep_first_position() {
        let adj = AdjacencyList::build(&nodes(&["A", "B", "A"]), &edges(&[("B", "A")]));
        assert_eq!(adj.node_count(), 2);
        assert_eq!(adj.node_index("A").map(NodeIndex::index), Some(0));
    }

    #[test]
    fn edge_weight_defaults_and_confidence_carry_over() {
        let adj = AdjacencyList::build(
            &nodes(&["A", "B"]),
            &[
                Edge::new("A", "B"),
                Edge::new("B", "A")
                    .with_weight(0.9)
                    .with_confidence(Confidence::Suspected),
            ],
        );
        let links: Vec<&Link> = adj.links().map(|(_, _, link)| link).collect();
        assert!((links[0].weight - 0.5).abs() < f64::EPSILON);
        assert_eq!(links[0].confidence, None);
        assert!((links[1].weight - 0.9).abs() < f64::EPSILON);
        assert_eq!(links[1].confidence, Some(Confidence::Suspected));
    }

    #[test]
    fn content_hash_ignores_edge_order() {
        let ns = nodes(&["A", "B", "C"]);
        let forward = AdjacencyList::build(&ns, &edges(&[("A", "B"), ("B", "C")]));
        let reversed = AdjacencyList::build(&ns, &edges(&[("B", "C"), ("A", "B")]));
        assert_eq!(forward.content_hash, reversed.content_hash);
    }

    #[test]
    fn content_hash_changes_with_edges() {
        let ns = nodes(&["A", "B"]);
        let empty = AdjacencyList::build(&ns, &[]).content_hash;
        let linked = AdjacencyList::build(&ns, &edges(&[("A", "B")])).content_hash;
        assert_ne!(empty, linked, "hash must change when edges added");
    }

    #[test]
    fn content_hash_ignores_dropped_edges() {
        let ns = nodes(&["A", "B"]);
        let clean = AdjacencyList::build(&ns, &edges(&[("A", "B")])).content_hash;
        let noisy = AdjacencyList::build(&ns, &edges(&[("A", "B"), ("A", "ghost")])).content_hash;
        assert_eq!(clean, noisy);
    }
}
