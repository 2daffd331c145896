//! Structural pattern detection: triangles and stars.
//!
//! Both patterns are read off the undirected [`NeighborView`], so edge
//! direction and multiplicity never matter here.
//!
//! - **Triangle**: three distinct mutually linked nodes. Each unordered
//!   triple is reported once, members in input order.
//! - **Star**: a node with at least `min_star_size` undirected neighbours.
//!   Significance is that neighbour count over the node count.
//!
//! # Self-loops
//!
//! A self-loop makes a node its own neighbour in the view. Stars keep that
//! in the neighbour count, the same count clustering and structural-hole
//! scoring use, but list the centre only once in `nodes`. Triangles need
//! three distinct nodes, so a self-loop never closes one.

use std::collections::HashSet;
use std::fmt;

use linkscope_core::config::PatternConfig;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::{AdjacencyList, NeighborView};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternKind {
    Triangle,
    Star,
}

impl PatternKind {
    /// Wire name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Triangle => "TRIANGLE",
            Self::Star => "STAR",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPattern {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    /// Member node ids. For a star the centre comes first.
    pub nodes: Vec<String>,
    pub significance: f64,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Triangles
// ---------------------------------------------------------------------------

/// Every triangle, in discovery order.
///
/// Discovery walks `a` in input order, then `b ∈ N(a)` and `c ∈ N(b)` in
/// neighbour order, so the first sighting of a triple decides its position.
#[must_use]
#[instrument(skip_all, fields(nodes = view.len()))]
pub fn find_triangles(
    adj: &AdjacencyList,
    view: &NeighborView,
    significance: f64,
) -> Vec<NetworkPattern> {
    let mut seen: HashSet<[usize; 3]> = HashSet::new();
    let mut triangles = Vec::new();

    for a in view.nodes() {
        for &b in view.neighbors(a) {
            if b == a {
                continue;
            }
            for &c in view.neighbors(b) {
                if c == a || c == b || !view.are_adjacent(c, a) {
                    continue;
                }
                let mut key = [a.index(), b.index(), c.index()];
                key.sort_unstable();
                if !seen.insert(key) {
                    continue;
                }
                let nodes: Vec<String> = key
                    .iter()
                    .map(|&i| adj.id(NodeIndex::new(i)).to_string())
                    .collect();
                let description = format!(
                    "Closed triad: {}, {} and {} are all directly linked",
                    nodes[0], nodes[1], nodes[2]
                );
                triangles.push(NetworkPattern {
                    kind: PatternKind::Triangle,
                    nodes,
                    significance,
                    description,
                });
            }
        }
    }

    debug!(count = triangles.len(), "triangles found");
    triangles
}

// ---------------------------------------------------------------------------
// Stars
// ---------------------------------------------------------------------------

/// Every star centre with at least `min_size` undirected neighbours,
/// largest first (ties in input order).
#[must_use]
#[instrument(skip_all, fields(nodes = view.len(), min_size))]
pub fn find_stars(
    adj: &AdjacencyList,
    view: &NeighborView,
    min_size: usize,
) -> Vec<NetworkPattern> {
    let n = view.len();
    let mut stars: Vec<(usize, NetworkPattern)> = Vec::new();

    for centre in view.nodes() {
        let k = view.neighbor_count(centre);
        if k < min_size {
            continue;
        }
        let leaves: Vec<NodeIndex> = view
            .neighbors(centre)
            .iter()
            .copied()
            .filter(|&w| w != centre)
            .collect();

        let mut nodes = Vec::with_capacity(leaves.len() + 1);
        nodes.push(adj.id(centre).to_string());
        nodes.extend(leaves.iter().map(|&w| adj.id(w).to_string()));

        let description = format!("{} is the hub of {k} direct contacts", adj.id(centre));
        stars.push((
            k,
            NetworkPattern {
                kind: PatternKind::Star,
                nodes,
                significance: ratio(k, n),
                description,
            },
        ));
    }

    stars.sort_by(|a, b| b.0.cmp(&a.0));
    debug!(count = stars.len(), "stars found");
    stars.into_iter().map(|(_, pattern)| pattern).collect()
}

/// Triangles followed by stars.
#[must_use]
pub fn detect_patterns(
    adj: &AdjacencyList,
    view: &NeighborView,
    config: &PatternConfig,
) -> Vec<NetworkPattern> {
    let mut patterns = find_triangles(adj, view, config.triangle_significance);
    patterns.extend(find_stars(adj, view, config.min_star_size));
    patterns
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
