//! Top-K extraction for per-node scores.
//!
//! Ranking is descending by score. Equal scores keep input node order
//! (stable sort), so identical snapshots always produce identical lists.

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::graph::AdjacencyList;

/// One entry of a `top_by_*` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub id: String,
    pub value: f64,
}

/// The `k` highest-scoring nodes.
///
/// `scores` is indexed by `NodeIndex::index()` and must cover every node
/// of `adj`.
#[must_use]
pub fn top_k(adj: &AdjacencyList, scores: &[f64], k: usize) -> Vec<RankedNode> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    order
        .into_iter()
        .take(k)
        .map(|i| RankedNode {
            id: adj.id(NodeIndex::new(i)).to_string(),
            value: scores[i],
        })
        .collect()
}
