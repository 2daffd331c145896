//! Undirected neighbour view over an [`AdjacencyList`].
//!
//! Edges carry direction, but every traversal in this crate (BFS, DFS,
//! centrality, clustering, patterns) treats the graph as undirected. The
//! view is derived once per analysis: `N(v)` is the union of `v`'s in- and
//! out-neighbours, de-duplicated and sorted by node input order. Sorting
//! makes every traversal independent of the order edges arrived in.
//!
//! A self-loop makes a node its own neighbour.

use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;

use super::build::AdjacencyList;

/// De-duplicated undirected neighbour sets, indexed by `NodeIndex::index()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborView {
    neighbors: Vec<Vec<NodeIndex>>,
}

impl NeighborView {
    /// Derive the view from the directed adjacency.
    #[must_use]
    pub fn from_adjacency(adj: &AdjacencyList) -> Self {
        let mut neighbors: Vec<Vec<NodeIndex>> = vec![Vec::new(); adj.node_count()];
        for (source, target, _) in adj.links() {
            neighbors[source.index()].push(target);
            neighbors[target.index()].push(source);
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        Self { neighbors }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// All node indices in input order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.neighbors.len()).map(NodeIndex::new)
    }

    /// `N(v)`, sorted by input order.
    #[must_use]
    pub fn neighbors(&self, v: NodeIndex) -> &[NodeIndex] {
        &self.neighbors[v.index()]
    }

    /// `|N(v)|`.
    #[must_use]
    pub fn neighbor_count(&self, v: NodeIndex) -> usize {
        self.neighbors[v.index()].len()
    }

    /// Whether an edge joins `a` and `b` in either direction.
    #[must_use]
    pub fn are_adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.neighbors[a.index()].binary_search(&b).is_ok()
    }

    /// A cleared visited set sized for this view.
    #[must_use]
    pub fn visited_set(&self) -> FixedBitSet {
        FixedBitSet::with_capacity(self.neighbors.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkscope_core::model::{Edge, Node};

    fn view(ids: &[&str], pairs: &[(&str, &str)]) -> (AdjacencyList, NeighborView) {
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(*id)).collect();
        let edges: Vec<Edge> = pairs.iter().map(|(s, t)| Edge::new(*s, *t)).collect();
        let adj = AdjacencyList::build(&nodes, &edges);
        let view = NeighborView::from_adjacency(&adj);
        (adj, view)
    }

    fn ids<'a>(adj: &'a AdjacencyList, list: &[NodeIndex]) -> Vec<&'a str> {
        list.iter().map(|&i| adj.id(i)).collect()
    }

    #[test]
    fn direction_is_ignored() {
        let (adj, view) = view(&["A", "B", "C"], &[("A", "B"), ("C", "B")]);
        let b = adj.node_index("B").expect("B node");
        assert_eq!(ids(&adj, view.neighbors(b)), vec!["A", "C"]);
    }

    #[test]
    fn bidirectional_pair_is_one_neighbour() {
        let (adj, view) = view(&["A", "B"], &[("A", "B"), ("B", "A"), ("A", "B")]);
        let a = adj.node_index("A").expect("A node");
        assert_eq!(view.neighbor_count(a), 1);
    }

    #[test]
    fn neighbours_sorted_by_input_order_not_edge_order() {
        let (adj, view) = view(&["A", "B", "C", "D"], &[("A", "D"), ("C", "A"), ("A", "B")]);
        let a = adj.node_index("A").expect("A node");
        assert_eq!(ids(&adj, view.neighbors(a)), vec!["B", "C", "D"]);
    }

    #[test]
    fn self_loop_is_own_neighbour() {
        let (adj, view) = view(&["A", "B"], &[("A", "A"), ("A", "B")]);
        let a = adj.node_index("A").expect("A node");
        assert_eq!(ids(&adj, view.neighbors(a)), vec!["A", "B"]);
        assert!(view.are_adjacent(a, a));
    }

    #[test]
    fn adjacency_is_symmetric() {
        let (adj, view) = view(&["A", "B", "C"], &[("A", "B")]);
        let a = adj.node_index("A").expect("A node");
        let b = adj.node_index("B").expect("B node");
        let c = adj.node_index("C").expect("C node");
        assert!(view.are_adjacent(a, b));
        assert!(view.are_adjacent(b, a));
        assert!(!view.are_adjacent(a, c));
    }
}
