#![forbid(unsafe_code)]
//! linkscope-graph library.
//!
//! The analysis engine: adjacency construction ([`graph`]), centrality and
//! structure metrics ([`metrics`]), pattern and anomaly detection
//! ([`patterns`], [`anomaly`]), hop-count path search ([`paths`]), and the
//! [`NetworkAnalyzer`] entry points that tie them together.
//!
//! # Conventions
//!
//! - **Errors**: engine entry points are infallible; degenerate input
//!   yields zeros and empty lists, never NaN.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **Ordering**: every ranked or listed output is deterministic, with
//!   input node order as the final tie-break.

pub mod anomaly;
pub mod engine;
pub mod graph;
pub mod metrics;
pub mod paths;
pub mod patterns;

pub use anomaly::{AnomalyKind, NetworkAnomaly, Severity};
pub use engine::{NetworkAnalyzer, NetworkReport};
pub use graph::{AdjacencyList, NeighborView, NetworkMetrics, NodeMetrics};
pub use metrics::ranking::RankedNode;
pub use paths::PathResult;
pub use patterns::{NetworkPattern, PatternKind};
