//! Network-level and node-level metric summaries.
//!
//! # Network Metrics
//!
//! - **node_count** / **edge_count**: nodes, and edges retained after
//!   dropping those with unknown endpoints.
//! - **density**: `edge_count / (node_count * (node_count - 1))`, the
//!   directed capacity; 0.0 for graphs with fewer than 2 nodes.
//! - **avg_degree**: mean of in + out degree.
//! - **top_by_degree / top_by_betweenness / top_by_closeness**: the
//!   highest-scoring nodes, ties in input order.
//! - **avg_clustering_coefficient**: mean local clustering.
//! - **component_count / largest_component_size**: undirected connected
//!   components.
//!
//! Every field is a plain value; empty graphs yield zeros, never NaN.

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::graph::{AdjacencyList, NeighborView};
use crate::metrics::basic::{component_info, density};
use crate::metrics::closeness::{closeness_centrality, closeness_of};
use crate::metrics::clustering::{
    average_clustering, clustering_coefficient, clustering_coefficients,
};
use crate::metrics::ranking::{RankedNode, top_k};

// ---------------------------------------------------------------------------
// NetworkMetrics
// ---------------------------------------------------------------------------

/// Summary metrics for a whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub avg_degree: f64,
    pub top_by_degree: Vec<RankedNode>,
    pub top_by_betweenness: Vec<RankedNode>,
    pub top_by_closeness: Vec<RankedNode>,
    pub avg_clustering_coefficient: f64,
    pub component_count: usize,
    pub largest_component_size: usize,
}

impl NetworkMetrics {
    /// Compute every network metric from precomputed degree and betweenness
    /// scores. `limit` bounds each `top_by_*` list.
    #[must_use]
    pub fn compute_with(
        adj: &AdjacencyList,
        view: &NeighborView,
        limit: usize,
        degree_scores: &[f64],
        betweenness: &[f64],
    ) -> Self {
        let node_count = adj.node_count();
        let edge_count = adj.edge_count();

        let avg_degree = if node_count == 0 {
            0.0
        } else {
            degree_scores.iter().sum::<f64>() / as_f64(node_count)
        };

        let closeness = closeness_centrality(view);
        let clustering = clustering_coefficients(view);
        let components = component_info(view);

        Self {
            node_count,
            edge_count,
            density: density(node_count, edge_count),
            avg_degree,
            top_by_degree: top_k(adj, degree_scores, limit),
            top_by_betweenness: top_k(adj, betweenness, limit),
            top_by_closeness: top_k(adj, &closeness, limit),
            avg_clustering_coefficient: average_clustering(&clustering),
            component_count: components.count,
            largest_component_size: components.largest,
        }
    }

    /// Return `true` if the snapshot has no retained edges.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }

    /// Return `true` if the graph splits into more than one component.
    #[must_use]
    pub const fn is_fragmented(&self) -> bool {
        self.component_count > 1
    }
}

// ---------------------------------------------------------------------------
// NodeMetrics
// ---------------------------------------------------------------------------

/// Metrics for a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetrics {
    pub degree: usize,
    pub in_degree: usize,
    pub out_degree: usize,
    pub betweenness: f64,
    pub closeness: f64,
    pub clustering_coefficient: f64,
}

impl NodeMetrics {
    /// Compute metrics for `idx`. `betweenness` holds whole-graph scores
    /// (betweenness has no per-node shortcut).
    #[must_use]
    pub fn compute(
        adj: &AdjacencyList,
        view: &NeighborView,
        idx: NodeIndex,
        betweenness: &[f64],
    ) -> Self {
        let in_degree = adj.in_degree(idx);
        let out_degree = adj.out_degree(idx);
        Self {
            degree: in_degree + out_degree,
            in_degree,
            out_degree,
            betweenness: betweenness.get(idx.index()).copied().unwrap_or(0.0),
            closeness: closeness_of(view, idx),
            clustering_coefficient: clustering_coefficient(view, idx),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
const fn as_f64(n: usize) -> f64 {
    n as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
