//! Centrality and structure metrics for the investigation graph.
//!
//! # Overview
//!
//! Each metric answers a different question about an entity:
//!
//! - **Degree** (`basic`): How many links touch this entity?
//! - **Betweenness** (`betweenness`): Which entities broker contact between
//!   otherwise distant parts of the network?
//! - **Closeness** (`closeness`): Which entities can reach the rest of
//!   their component in the fewest hops?
//! - **Clustering** (`clustering`): Are this entity's contacts in contact
//!   with each other?
//! - **Components** (`basic`): How many disjoint sub-networks are there?
//!
//! # Usage
//!
//! Per-node metrics return a `Vec` indexed by `NodeIndex::index()`;
//! [`ranking::top_k`] maps them back to node ids.
//!
//! ```rust,ignore
//! use linkscope_graph::graph::{AdjacencyList, NeighborView};
//! use linkscope_graph::metrics::{betweenness::betweenness_centrality, ranking::top_k};
//!
//! let adj = AdjacencyList::build(&nodes, &edges);
//! let view = NeighborView::from_adjacency(&adj);
//! let bc = betweenness_centrality(&view);
//! let brokers = top_k(&adj, &bc, 10);
//! ```

pub mod basic;
pub mod betweenness;
pub mod closeness;
pub mod clustering;
pub mod ranking;
