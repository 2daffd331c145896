//! Hop-count path search over the undirected view.
//!
//! [`shortest_path`] is a BFS returning the first path discovered; because
//! neighbour lists are sorted by input order, that path is the one whose
//! hops prefer earlier nodes. [`all_paths`] enumerates simple paths with a
//! depth bound applied while walking, so paths longer than `max_depth` hops
//! are never explored.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::{AdjacencyList, NeighborView};

/// A path as node ids plus its hop count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    pub path: Vec<String>,
    pub distance: usize,
}

/// Shortest hop path from `source` to `target`.
///
/// `None` when either id is unknown or `target` is unreachable.
#[must_use]
#[instrument(skip(adj, view))]
pub fn shortest_path(
    adj: &AdjacencyList,
    view: &NeighborView,
    source: &str,
    target: &str,
) -> Option<PathResult> {
    let start = adj.node_index(source)?;
    let goal = adj.node_index(target)?;

    if start == goal {
        return Some(PathResult {
            path: vec![source.to_string()],
            distance: 0,
        });
    }

    let mut visited = view.visited_set();
    let mut parent: Vec<Option<NodeIndex>> = vec![None; view.len()];
    let mut queue = VecDeque::from([start]);
    visited.insert(start.index());

    while let Some(current) = queue.pop_front() {
        for &next in view.neighbors(current) {
            if visited.put(next.index()) {
                continue;
            }
            parent[next.index()] = Some(current);
            if next == goal {
                let path = unwind(adj, &parent, goal);
                let distance = path.len() - 1;
                return Some(PathResult { path, distance });
            }
            queue.push_back(next);
        }
    }

    debug!("no path");
    None
}

fn unwind(adj: &AdjacencyList, parent: &[Option<NodeIndex>], goal: NodeIndex) -> Vec<String> {
    let mut path = vec![adj.id(goal).to_string()];
    let mut cursor = goal;
    while let Some(prev) = parent[cursor.index()] {
        path.push(adj.id(prev).to_string());
        cursor = prev;
    }
    path.reverse();
    path
}

// ---------------------------------------------------------------------------
// All paths
// ---------------------------------------------------------------------------

/// Every simple path from `source` to `target` of at most `max_depth` hops,
/// in DFS order.
///
/// `max_paths` stops the search after that many results. Unknown ids give
/// no paths; `source == target` gives the single path `[source]`.
#[must_use]
#[instrument(skip(adj, view))]
pub fn all_paths(
    adj: &AdjacencyList,
    view: &NeighborView,
    source: &str,
    target: &str,
    max_depth: usize,
    max_paths: Option<usize>,
) -> Vec<Vec<String>> {
    let (Some(start), Some(goal)) = (adj.node_index(source), adj.node_index(target)) else {
        return Vec::new();
    };
    // A simple path visits each node at most once.
    let max_depth = max_depth.min(view.len().saturating_sub(1));

    let mut search = PathSearch {
        view,
        goal,
        max_depth,
        limit: max_paths.unwrap_or(usize::MAX),
        on_path: view.visited_set(),
        stack: Vec::with_capacity(max_depth + 1),
        found: Vec::new(),
    };
    search.walk(start);

    debug!(count = search.found.len(), "paths enumerated");
    search
        .found
        .into_iter()
        .map(|path| path.into_iter().map(|idx| adj.id(idx).to_string()).collect())
        .collect()
}

struct PathSearch<'a> {
    view: &'a NeighborView,
    goal: NodeIndex,
    max_depth: usize,
    limit: usize,
    on_path: FixedBitSet,
    stack: Vec<NodeIndex>,
    found: Vec<Vec<NodeIndex>>,
}

impl PathSearch<'_> {
    fn walk(&mut self, current: NodeIndex) {
        if self.found.len() >= self.limit {
            return;
        }

        self.stack.push(current);
        self.on_path.insert(current.index());

        if current == self.goal {
            self.found.push(self.stack.clone());
        } else if self.stack.len() <= self.max_depth {
            // stack.len() - 1 hops so far; one more stays within max_depth.
            for &next in self.view.neighbors(current) {
                if !self.on_path.contains(next.index()) {
                    self.walk(next);
                }
            }
        }

        self.on_path.set(current.index(), false);
        self.stack.pop();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
