//! Closeness centrality over the undirected view.
//!
//! `closeness(s) = reached / Σ dist(s, t)` over every node `t ≠ s`
//! reachable from `s`. Only the node's own component contributes, so a
//! node in a small tight cluster can outscore a peripheral node of a large
//! one. A node that reaches nothing scores 0.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use tracing::instrument;

use crate::graph::NeighborView;

/// Hop distances from `source` to every node (`None` = unreachable).
#[must_use]
pub fn bfs_distances(view: &NeighborView, source: NodeIndex) -> Vec<Option<usize>> {
    let mut dist = vec![None; view.len()];
    dist[source.index()] = Some(0);
    let mut queue = VecDeque::from([(source, 0usize)]);

    while let Some((v, d)) = queue.pop_front() {
        for &w in view.neighbors(v) {
            if dist[w.index()].is_none() {
                dist[w.index()] = Some(d + 1);
                queue.push_back((w, d + 1));
            }
        }
    }

    dist
}

/// Closeness of a single node.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_of(view: &NeighborView, source: NodeIndex) -> f64 {
    let (reached, total) = bfs_distances(view, source)
        .into_iter()
        .flatten()
        .filter(|&d| d > 0)
        .fold((0usize, 0usize), |(count, sum), d| (count + 1, sum + d));

    if total == 0 {
        0.0
    } else {
        reached as f64 / total as f64
    }
}

/// Closeness for every node, indexed by `NodeIndex::index()`.
#[must_use]
#[instrument(skip(view), fields(nodes = view.len()))]
pub fn closeness_centrality(view: &NeighborView) -> Vec<f64> {
    view.nodes().map(|v| closeness_of(view, v)).collect()
}
