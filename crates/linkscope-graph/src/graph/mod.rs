//! Graph construction for network analysis.
//!
//! # Overview
//!
//! Every analysis call starts from a fresh snapshot and builds two
//! structures, both discarded when the call returns:
//!
//! ```text
//! nodes: &[Node], edges: &[Edge]
//!        ↓  build::AdjacencyList::build()
//! AdjacencyList (directed petgraph DiGraph, input node order)
//!        ↓  view::NeighborView::from_adjacency()
//! NeighborView (undirected, de-duplicated neighbour sets)
//!        ↓
//! metrics / patterns / anomaly / paths
//! ```
//!
//! Directed degree counts come from the [`AdjacencyList`]; everything that
//! traverses the graph reads the [`NeighborView`].
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use linkscope_graph::graph::{AdjacencyList, NeighborView};
//!
//! let adj = AdjacencyList::build(&snapshot.nodes, &snapshot.edges);
//! let view = NeighborView::from_adjacency(&adj);
//! println!("nodes={} edges={} hash={}", adj.node_count(), adj.edge_count(), adj.content_hash);
//! ```

pub mod build;
pub mod stats;
pub mod view;

pub use build::{AdjacencyList, Link};
pub use stats::{NetworkMetrics, NodeMetrics};
pub use view::NeighborView;
