//! Static graph metrics: degree centrality, density, and components.
//!
//! # Overview
//!
//! These are the cheap, linear-time metrics computed on every analysis
//! call. Degree is directed (it counts edge endpoints on the
//! [`AdjacencyList`]); components are undirected (they walk the
//! [`NeighborView`]).
//!
//! Per-node outputs are `Vec`s indexed by `NodeIndex::index()`, i.e. input
//! node order.

use petgraph::graph::NodeIndex;

use crate::graph::{AdjacencyList, NeighborView};

// ---------------------------------------------------------------------------
// Degree Centrality
// ---------------------------------------------------------------------------

/// Per-node degree counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeCentrality {
    /// `|in(v)|`: edges arriving at the node.
    pub in_degree: Vec<usize>,
    /// `|out(v)|`: edges leaving the node.
    pub out_degree: Vec<usize>,
    /// In + out. A bidirectional pair or a self-loop counts twice.
    pub total_degree: Vec<usize>,
}

/// Compute degree centrality for every node.
#[must_use]
pub fn degree_centrality(adj: &AdjacencyList) -> DegreeCentrality {
    let n = adj.node_count();
    let mut in_degree = Vec::with_capacity(n);
    let mut out_degree = Vec::with_capacity(n);
    let mut total_degree = Vec::with_capacity(n);

    for idx in adj.node_indices() {
        let in_d = adj.in_degree(idx);
        let out_d = adj.out_degree(idx);
        in_degree.push(in_d);
        out_degree.push(out_d);
        total_degree.push(in_d + out_d);
    }

    DegreeCentrality {
        in_degree,
        out_degree,
        total_degree,
    }
}

impl DegreeCentrality {
    /// Arithmetic mean of total degree; 0.0 for an empty graph.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f64 {
        if self.total_degree.is_empty() {
            return 0.0;
        }
        let sum: usize = self.total_degree.iter().sum();
        sum as f64 / self.total_degree.len() as f64
    }

    /// Population standard deviation of total degree; 0.0 for an empty graph.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn std_dev(&self) -> f64 {
        if self.total_degree.is_empty() {
            return 0.0;
        }
        let mean = self.average();
        let variance = self
            .total_degree
            .iter()
            .map(|&d| {
                let diff = d as f64 - mean;
                diff * diff
            })
            .sum::<f64>()
            / self.total_degree.len() as f64;
        variance.sqrt()
    }

    /// Total degree as `f64`, for ranking.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_scores(&self) -> Vec<f64> {
        self.total_degree.iter().map(|&d| d as f64).collect()
    }
}

// ---------------------------------------------------------------------------
// Graph Density
// ---------------------------------------------------------------------------

/// Density = edges / (nodes * (nodes - 1)), the directed-graph capacity.
///
/// Returns 0.0 for graphs with fewer than 2 nodes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Component Analysis
// ---------------------------------------------------------------------------

/// Connected components of the undirected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    /// Number of connected components.
    pub count: usize,
    /// Node count of the largest component (0 for an empty graph).
    pub largest: usize,
    /// Members of each component, sorted by input order. Components appear
    /// in the order their first node appears in the input.
    pub members: Vec<Vec<NodeIndex>>,
}

/// Compute connected components by DFS from each unvisited node in input
/// order.
#[must_use]
pub fn component_info(view: &NeighborView) -> ComponentInfo {
    let mut visited = view.visited_set();
    let mut members = Vec::new();

    for start in view.nodes() {
        if visited.contains(start.index()) {
            continue;
        }

        let mut stack = vec![start];
        let mut component = Vec::new();

        while let Some(node) = stack.pop() {
            if visited.put(node.index()) {
                continue;
            }
            component.push(node);

            for &neighbor in view.neighbors(node) {
                if !visited.contains(neighbor.index()) {
                    stack.push(neighbor);
                }
            }
        }

        component.sort_unstable();
        members.push(component);
    }

    let largest = members.iter().map(Vec::len).max().unwrap_or(0);

    ComponentInfo {
        count: members.len(),
        largest,
        members,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
