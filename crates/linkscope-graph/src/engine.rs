//! Entry points for callers that hold a node list and an edge list.
//!
//! Every method rebuilds the adjacency from the inputs it is given and
//! drops it on return. No state is carried between calls, so a single
//! [`NetworkAnalyzer`] can be shared across threads.

use linkscope_core::config::AnalysisConfig;
use linkscope_core::model::{Edge, Node};
use linkscope_core::timing::timed;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::anomaly::{self, NetworkAnomaly};
use crate::graph::{AdjacencyList, NeighborView, NetworkMetrics, NodeMetrics};
use crate::metrics::basic::{component_info, degree_centrality};
use crate::metrics::betweenness::betweenness_centrality;
use crate::paths::{self, PathResult};
use crate::patterns::{self, NetworkPattern};

/// Everything the dashboard shows for a snapshot, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkReport {
    /// [`AdjacencyList::content_hash`] of the analysed snapshot.
    pub fingerprint: String,
    pub metrics: NetworkMetrics,
    pub patterns: Vec<NetworkPattern>,
    pub anomalies: Vec<NetworkAnomaly>,
}

/// Stateless analysis engine parameterised by an [`AnalysisConfig`].
#[derive(Debug, Clone, Default)]
pub struct NetworkAnalyzer {
    config: AnalysisConfig,
}

struct Prepared {
    adj: AdjacencyList,
    view: NeighborView,
}

impl Prepared {
    fn new(nodes: &[Node], edges: &[Edge]) -> Self {
        let adj = timed("build_adjacency", || AdjacencyList::build(nodes, edges));
        let view = NeighborView::from_adjacency(&adj);
        Self { adj, view }
    }

    fn betweenness(&self) -> Vec<f64> {
        timed("betweenness", || betweenness_centrality(&self.view))
    }
}

impl NetworkAnalyzer {
    #[must_use]
    pub const fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Network-wide metrics with `top_k`-bounded rankings.
    #[must_use]
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn network_metrics(&self, nodes: &[Node], edges: &[Edge]) -> NetworkMetrics {
        let prepared = Prepared::new(nodes, edges);
        self.metrics_for(&prepared, &prepared.betweenness())
    }

    /// Metrics for one node; `None` if `id` is not in `nodes`.
    #[must_use]
    #[instrument(skip(self, nodes, edges))]
    pub fn node_metrics(&self, nodes: &[Node], edges: &[Edge], id: &str) -> Option<NodeMetrics> {
        let prepared = Prepared::new(nodes, edges);
        let idx = prepared.adj.node_index(id)?;
        let betweenness = prepared.betweenness();
        Some(timed("node_metrics", || {
            NodeMetrics::compute(&prepared.adj, &prepared.view, idx, &betweenness)
        }))
    }

    /// Triangles then stars.
    #[must_use]
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn detect_patterns(&self, nodes: &[Node], edges: &[Edge]) -> Vec<NetworkPattern> {
        let prepared = Prepared::new(nodes, edges);
        self.patterns_for(&prepared)
    }

    /// Anomalies sorted by severity then score.
    #[must_use]
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn detect_anomalies(&self, nodes: &[Node], edges: &[Edge]) -> Vec<NetworkAnomaly> {
        let prepared = Prepared::new(nodes, edges);
        self.anomalies_for(&prepared, &prepared.betweenness())
    }

    /// Shortest hop path between two node ids.
    #[must_use]
    #[instrument(skip(self, nodes, edges))]
    pub fn shortest_path(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        source: &str,
        target: &str,
    ) -> Option<PathResult> {
        let prepared = Prepared::new(nodes, edges);
        timed("shortest_path", || {
            paths::shortest_path(&prepared.adj, &prepared.view, source, target)
        })
    }

    /// Simple paths between two node ids.
    ///
    /// `max_depth` falls back to the configured `paths.max_depth`; the
    /// result cap always comes from `paths.max_paths`.
    #[must_use]
    #[instrument(skip(self, nodes, edges))]
    pub fn all_paths(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        source: &str,
        target: &str,
        max_depth: Option<usize>,
    ) -> Vec<Vec<String>> {
        let prepared = Prepared::new(nodes, edges);
        let depth = max_depth.unwrap_or(self.config.paths.max_depth);
        timed("all_paths", || {
            paths::all_paths(
                &prepared.adj,
                &prepared.view,
                source,
                target,
                depth,
                self.config.paths.max_paths,
            )
        })
    }

    /// Node ids of each connected component, in discovery order.
    #[must_use]
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn components(&self, nodes: &[Node], edges: &[Edge]) -> Vec<Vec<String>> {
        let prepared = Prepared::new(nodes, edges);
        timed("components", || component_info(&prepared.view))
            .members
            .into_iter()
            .map(|members| {
                members
                    .into_iter()
                    .map(|idx| prepared.adj.id(idx).to_string())
                    .collect()
            })
            .collect()
    }

    /// Metrics, patterns and anomalies from a single adjacency build.
    #[must_use]
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn report(&self, nodes: &[Node], edges: &[Edge]) -> NetworkReport {
        let prepared = Prepared::new(nodes, edges);
        let betweenness = prepared.betweenness();
        NetworkReport {
            fingerprint: prepared.adj.content_hash.clone(),
            metrics: self.metrics_for(&prepared, &betweenness),
            patterns: self.patterns_for(&prepared),
            anomalies: self.anomalies_for(&prepared, &betweenness),
        }
    }

    fn metrics_for(&self, prepared: &Prepared, betweenness: &[f64]) -> NetworkMetrics {
        timed("network_metrics", || {
            let degrees = degree_centrality(&prepared.adj).as_scores();
            NetworkMetrics::compute_with(
                &prepared.adj,
                &prepared.view,
                self.config.ranking.top_k,
                &degrees,
                betweenness,
            )
        })
    }

    fn patterns_for(&self, prepared: &Prepared) -> Vec<NetworkPattern> {
        timed("detect_patterns", || {
            patterns::detect_patterns(&prepared.adj, &prepared.view, &self.config.patterns)
        })
    }

    fn anomalies_for(&self, prepared: &Prepared, betweenness: &[f64]) -> Vec<NetworkAnomaly> {
        timed("detect_anomalies", || {
            anomaly::detect_anomalies(
                &prepared.adj,
                &prepared.view,
                betweenness,
                &self.config.anomaly,
            )
        })
    }
}
