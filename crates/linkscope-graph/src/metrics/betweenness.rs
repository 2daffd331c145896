//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness, low-degree nodes are the
//! brokers of an investigation graph: removing them splits it apart.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs, run over the undirected
//! [`NeighborView`]:
//!
//! 1. For each source node `s`, BFS to compute shortest-path counts
//!    (`sigma`) and predecessor lists.
//! 2. Accumulate dependency scores (`delta`) in reverse BFS order.
//! 3. Sum the dependency scores into every non-source node.
//!
//! Complexity: O(V * E).
//!
//! # Normalization
//!
//! Sums run over every ordered source, so each unordered pair is counted
//! from both ends. The totals are scaled by `2 / ((n-1)(n-2))` for `n > 2`,
//! which puts a node that sits on every shortest path at 2.0. With `n ≤ 2`
//! no node can be intermediate and every score is 0.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use tracing::instrument;

use crate::graph::NeighborView;

/// Per-source working buffers, reset at the start of each Brandes pass.
///
/// Allocated once per call and reused for every source so the outer loop
/// does no per-iteration allocation after the first.
struct BrandesScratch {
    stack: Vec<NodeIndex>,
    predecessors: Vec<Vec<NodeIndex>>,
    sigma: Vec<f64>,
    dist: Vec<Option<usize>>,
    delta: Vec<f64>,
    queue: VecDeque<NodeIndex>,
}

impl BrandesScratch {
    fn new(n: usize) -> Self {
        Self {
            stack: Vec::with_capacity(n),
            predecessors: vec![Vec::new(); n],
            sigma: vec![0.0; n],
            dist: vec![None; n],
            delta: vec![0.0; n],
            queue: VecDeque::with_capacity(n),
        }
    }

    fn reset(&mut self, source: NodeIndex) {
        self.stack.clear();
        self.queue.clear();
        for preds in &mut self.predecessors {
            preds.clear();
        }
        self.sigma.fill(0.0);
        self.dist.fill(None);
        self.delta.fill(0.0);

        self.sigma[source.index()] = 1.0;
        self.dist[source.index()] = Some(0);
        self.queue.push_back(source);
    }
}

/// Compute normalized betweenness centrality for every node.
///
/// # Returns
///
/// One score per node, indexed by `NodeIndex::index()`. Disconnected nodes
/// and nodes with no shortest paths through them score 0.0.
#[must_use]
#[instrument(skip(view), fields(nodes = view.len()))]
pub fn betweenness_centrality(view: &NeighborView) -> Vec<f64> {
    let n = view.len();
    let mut cb: Vec<f64> = vec![0.0; n];
    if n == 0 {
        return cb;
    }

    let mut scratch = BrandesScratch::new(n);

    for s in view.nodes() {
        scratch.reset(s);
        let BrandesScratch {
            stack,
            predecessors,
            sigma,
            dist,
            delta,
            queue,
        } = &mut scratch;

        while let Some(v) = queue.pop_front() {
            let vi = v.index();
            stack.push(v);
            let Some(dv) = dist[vi] else { continue };

            for &w in view.neighbors(v) {
                let wi = w.index();

                // First visit to w?
                if dist[wi].is_none() {
                    dist[wi] = Some(dv + 1);
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[wi] == Some(dv + 1) {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            let wi = w.index();

            for &v in &predecessors[wi] {
                let vi = v.index();
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if w != s {
                cb[wi] += delta[wi];
            }
        }
    }

    if n > 2 {
        let scale = normalization(n);
        for score in &mut cb {
            *score *= scale;
        }
    }

    cb
}

#[allow(clippy::cast_precision_loss)]
fn normalization(n: usize) -> f64 {
    2.0 / ((n - 1) as f64 * (n - 2) as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyList;
    use linkscope_core::model::{Edge, Node};

    fn scores(ids: &[&str], pairs: &[(&str, &str)]) -> Vec<f64> {
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(*id)).collect();
        let edges: Vec<Edge> = pairs.iter().map(|(s, t)| Edge::new(*s, *t)).collect();
        let adj = AdjacencyList::build(&nodes, &edges);
        betweenness_centrality(&NeighborView::from_adjacency(&adj))
    }

    #[test]
    fn empty_graph_returns_empty() {
        assert!(scores(&[], &[]).is_empty());
    }

    #[test]
    fn single_node_zero_betweenness() {
        assert_eq!(scores(&["A"], &[]), vec![0.0]);
    }

    #[test]
    fn two_nodes_stay_unnormalized_zero() {
        assert_eq!(scores(&["A", "B"], &[("A", "B")]), vec![0.0, 0.0]);
    }

    #[test]
    fn linear_chain_middle_node_has_betweenness() {
        // A → B → C
        // B is on the A–C shortest path, counted from both ends (raw 2),
        // scaled by 2/((3-1)(3-2)) = 1 → 2.0.
        let bc = scores(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);

        assert!((bc[0] - 0.0).abs() < 1e-10, "A is an endpoint");
        assert!((bc[1] - 2.0).abs() < 1e-10, "B = 2.0, got {}", bc[1]);
        assert!((bc[2] - 0.0).abs() < 1e-10, "C is an endpoint");
    }

    #[test]
    fn direction_does_not_matter() {
        // A → B ← C behaves like the chain above.
        let bc = scores(&["A", "B", "C"], &[("A", "B"), ("C", "B")]);
        assert!((bc[1] - 2.0).abs() < 1e-10, "B = 2.0, got {}", bc[1]);
    }

    #[test]
    fn star_topology_center_carries_all_paths() {
        // H with 4 leaves: every leaf pair (6) routes through H.
        // raw = 12, scale = 2/(4*3) → 2.0
        let bc = scores(
            &["H", "L1", "L2", "L3", "L4"],
            &[("H", "L1"), ("H", "L2"), ("H", "L3"), ("H", "L4")],
        );
        assert!((bc[0] - 2.0).abs() < 1e-10, "H = 2.0, got {}", bc[0]);
        for leaf in &bc[1..] {
            assert!(leaf.abs() < 1e-10);
        }
    }

    #[test]
    fn diamond_graph_splits_paths() {
        // A–B–D, A–C–D: B and C each carry half of the A–D pair, and
        // B–C has two shortest paths (via A and via D).
        // raw(B) = 2 * 0.5 = 1.0 → scaled by 2/(3*2) = 1/3
        let bc = scores(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        for score in &bc {
            assert!((score - 1.0 / 3.0).abs() < 1e-10, "got {score}");
        }
    }

    #[test]
    fn chain_of_four_betweenness() {
        // A–B–C–D: B on A–C and A–D (raw 4), C on A–D and B–D (raw 4);
        // scale 2/(3*2) → 4/3.
        let bc = scores(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);
        assert!(bc[0].abs() < 1e-10);
        assert!((bc[1] - 4.0 / 3.0).abs() < 1e-10, "B got {}", bc[1]);
        assert!((bc[2] - 4.0 / 3.0).abs() < 1e-10, "C got {}", bc[2]);
        assert!(bc[3].abs() < 1e-10);
    }

    #[test]
    fn disconnected_components_no_cross_betweenness() {
        let bc = scores(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D")]);
        for score in bc {
            assert!(score.abs() < 1e-10);
        }
    }

    #[test]
    fn scores_are_non_negative_and_finite() {
        let bc = scores(
            &["A", "B", "C", "D", "E"],
            &[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D"), ("D", "D"), ("E", "A")],
        );
        for score in bc {
            assert!(score.is_finite() && score >= 0.0, "got {score}");
        }
    }
}
