//! Local clustering coefficient.
//!
//! For node `v` with `k = |N(v)|` undirected neighbours, the coefficient is
//! the share of the `k(k-1)/2` neighbour pairs that are themselves linked
//! (in either direction). Nodes with fewer than two neighbours score 0.
//!
//! The same pair count drives structural-hole detection in
//! [`crate::anomaly`], which looks at the complementary share.

use petgraph::graph::NodeIndex;

use crate::graph::NeighborView;

/// Linked vs. total unordered neighbour pairs of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborPairs {
    pub linked: usize,
    pub total: usize,
}

impl NeighborPairs {
    /// Share of pairs that are linked; 0.0 when there are no pairs.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn linked_ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.linked as f64 / self.total as f64
        }
    }

    /// Share of pairs that are not linked; 0.0 when there are no pairs.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn unlinked_ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.total - self.linked) as f64 / self.total as f64
        }
    }
}

/// Count linked neighbour pairs of `v`.
#[must_use]
pub fn neighbor_pairs(view: &NeighborView, v: NodeIndex) -> NeighborPairs {
    let neighbors = view.neighbors(v);
    let k = neighbors.len();
    let total = if k < 2 { 0 } else { k * (k - 1) / 2 };

    let mut linked = 0;
    for (i, &a) in neighbors.iter().enumerate() {
        for &b in &neighbors[i + 1..] {
            if view.are_adjacent(a, b) {
                linked += 1;
            }
        }
    }

    NeighborPairs { linked, total }
}

/// Clustering coefficient of a single node.
#[must_use]
pub fn clustering_coefficient(view: &NeighborView, v: NodeIndex) -> f64 {
    neighbor_pairs(view, v).linked_ratio()
}

/// Clustering coefficient of every node, indexed by `NodeIndex::index()`.
#[must_use]
pub fn clustering_coefficients(view: &NeighborView) -> Vec<f64> {
    view.nodes()
        .map(|v| clustering_coefficient(view, v))
        .collect()
}

/// Mean clustering coefficient; 0.0 for an empty graph.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_clustering(coefficients: &[f64]) -> f64 {
    if coefficients.is_empty() {
        return 0.0;
    }
    coefficients.iter().sum::<f64>() / coefficients.len() as f64
}
