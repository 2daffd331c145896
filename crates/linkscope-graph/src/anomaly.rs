//! Heuristic anomaly detection.
//!
//! # Heuristics
//!
//! Five independent checks run over the snapshot; a node can trip several.
//!
//! | Kind | Trigger | Severity | Score |
//! |---|---|---|---|
//! | `ISOLATED` | degree 0 | MEDIUM | 0.6 |
//! | `ISOLATED` | degree 1, graph larger than `large_graph_nodes` | LOW | 0.3 |
//! | `SUPER_CONNECTED` | degree > avg + 2σ and > `super_connected_min_degree` | MEDIUM / HIGH / CRITICAL | `(d - avg) / 3σ`, capped at 1 |
//! | `BRIDGE` | betweenness > `bridge_min_betweenness`, 2 < degree < avg | HIGH | betweenness |
//! | `STRUCTURAL_HOLE` | ≥ 3 neighbours, unlinked pair share > `structural_hole_ratio` | MEDIUM | unlinked share |
//! | `SUSPICIOUS_LINK` | suspected edge heavier than `suspected_min_weight` | MEDIUM | `weight - 0.5` |
//! | `SUSPICIOUS_LINK` | confirmed edge lighter than `confirmed_max_weight` | LOW | `confirmed_max_weight - weight` |
//!
//! Degree statistics use total (in + out) degree and the population
//! standard deviation.
//!
//! # Ordering
//!
//! Results are sorted by severity, then score descending. Equal keys keep
//! discovery order: heuristics in table order, nodes and edges in input
//! order within each.

use std::fmt;

use linkscope_core::config::AnomalyConfig;
use linkscope_core::model::{Confidence, DEFAULT_EDGE_WEIGHT};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::{AdjacencyList, NeighborView};
use crate::metrics::basic::{DegreeCentrality, degree_centrality};
use crate::metrics::clustering::neighbor_pairs;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    Isolated,
    SuperConnected,
    Bridge,
    StructuralHole,
    SuspiciousLink,
}

impl AnomalyKind {
    /// Wire name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Isolated => "ISOLATED",
            Self::SuperConnected => "SUPER_CONNECTED",
            Self::Bridge => "BRIDGE",
            Self::StructuralHole => "STRUCTURAL_HOLE",
            Self::SuspiciousLink => "SUSPICIOUS_LINK",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort rank: 0 is most severe.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flagged node or edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAnomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    /// The flagged node, or `[source, target]` for a link.
    pub node_ids: Vec<String>,
    pub severity: Severity,
    pub score: f64,
    pub description: String,
    pub recommendation: String,
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Run every heuristic and return the merged, sorted anomalies.
///
/// `betweenness` holds normalized scores indexed by `NodeIndex::index()`.
#[must_use]
#[instrument(skip_all, fields(nodes = adj.node_count(), edges = adj.edge_count()))]
pub fn detect_anomalies(
    adj: &AdjacencyList,
    view: &NeighborView,
    betweenness: &[f64],
    config: &AnomalyConfig,
) -> Vec<NetworkAnomaly> {
    let degrees = degree_centrality(adj);
    let stats = DegreeStats::from(&degrees);

    let mut anomalies = Vec::new();
    isolated(adj, &degrees, config, &mut anomalies);
    super_connected(adj, &degrees, stats, config, &mut anomalies);
    bridges(adj, &degrees, stats, betweenness, config, &mut anomalies);
    structural_holes(adj, view, config, &mut anomalies);
    suspicious_links(adj, config, &mut anomalies);

    anomalies.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then_with(|| b.score.total_cmp(&a.score))
    });

    debug!(count = anomalies.len(), "anomalies detected");
    anomalies
}

#[derive(Debug, Clone, Copy)]
struct DegreeStats {
    avg: f64,
    std_dev: f64,
}

impl From<&DegreeCentrality> for DegreeStats {
    fn from(degrees: &DegreeCentrality) -> Self {
        Self {
            avg: degrees.average(),
            std_dev: degrees.std_dev(),
        }
    }
}

fn isolated(
    adj: &AdjacencyList,
    degrees: &DegreeCentrality,
    config: &AnomalyConfig,
    out: &mut Vec<NetworkAnomaly>,
) {
    let large = adj.node_count() > config.large_graph_nodes;
    for idx in adj.node_indices() {
        let id = adj.id(idx);
        match degrees.total_degree[idx.index()] {
            0 => out.push(NetworkAnomaly {
                kind: AnomalyKind::Isolated,
                node_ids: vec![id.to_string()],
                severity: Severity::Medium,
                score: 0.6,
                description: format!("{id} has no links to any other entity"),
                recommendation: "Check whether links for this entity were missed during collection"
                    .to_string(),
            }),
            1 if large => out.push(NetworkAnomaly {
                kind: AnomalyKind::Isolated,
                node_ids: vec![id.to_string()],
                severity: Severity::Low,
                score: 0.3,
                description: format!(
                    "{id} has a single link in a network of {} entities",
                    adj.node_count()
                ),
                recommendation: "Look for further connections to corroborate this entity"
                    .to_string(),
            }),
            _ => {}
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn super_connected(
    adj: &AdjacencyList,
    degrees: &DegreeCentrality,
    stats: DegreeStats,
    config: &AnomalyConfig,
    out: &mut Vec<NetworkAnomaly>,
) {
    let DegreeStats { avg, std_dev } = stats;
    for idx in adj.node_indices() {
        let degree = degrees.total_degree[idx.index()];
        let d = degree as f64;
        if d <= avg + 2.0 * std_dev || degree <= config.super_connected_min_degree {
            continue;
        }

        let severity = if d > avg + 3.0 * std_dev {
            Severity::Critical
        } else if d > avg + 2.5 * std_dev {
            Severity::High
        } else {
            Severity::Medium
        };
        let score = if std_dev > 0.0 {
            ((d - avg) / (3.0 * std_dev)).min(1.0)
        } else {
            1.0
        };

        let id = adj.id(idx);
        out.push(NetworkAnomaly {
            kind: AnomalyKind::SuperConnected,
            node_ids: vec![id.to_string()],
            severity,
            score,
            description: format!(
                "{id} has {degree} links against a network average of {avg:.2}"
            ),
            recommendation: "Review this entity as a possible coordinator or hub".to_string(),
        });
    }
}

#[allow(clippy::cast_precision_loss)]
fn bridges(
    adj: &AdjacencyList,
    degrees: &DegreeCentrality,
    stats: DegreeStats,
    betweenness: &[f64],
    config: &AnomalyConfig,
    out: &mut Vec<NetworkAnomaly>,
) {
    for idx in adj.node_indices() {
        let degree = degrees.total_degree[idx.index()];
        let bc = betweenness.get(idx.index()).copied().unwrap_or(0.0);
        if bc <= config.bridge_min_betweenness || (degree as f64) >= stats.avg || degree <= 2 {
            continue;
        }

        let id = adj.id(idx);
        out.push(NetworkAnomaly {
            kind: AnomalyKind::Bridge,
            node_ids: vec![id.to_string()],
            severity: Severity::High,
            score: bc,
            description: format!(
                "{id} links otherwise separate groups despite only {degree} links (betweenness {bc:.3})"
            ),
            recommendation: "Treat as a potential intermediary; removing it may split the network"
                .to_string(),
        });
    }
}

fn structural_holes(
    adj: &AdjacencyList,
    view: &NeighborView,
    config: &AnomalyConfig,
    out: &mut Vec<NetworkAnomaly>,
) {
    for idx in view.nodes() {
        if view.neighbor_count(idx) < 3 {
            continue;
        }
        let ratio = neighbor_pairs(view, idx).unlinked_ratio();
        if ratio <= config.structural_hole_ratio {
            continue;
        }

        let id = adj.id(idx);
        out.push(NetworkAnomaly {
            kind: AnomalyKind::StructuralHole,
            node_ids: vec![id.to_string()],
            severity: Severity::Medium,
            score: ratio,
            description: format!(
                "{:.0}% of {id}'s contacts have no link to each other",
                ratio * 100.0
            ),
            recommendation: "This entity may control information flow between its contacts"
                .to_string(),
        });
    }
}

fn suspicious_links(adj: &AdjacencyList, config: &AnomalyConfig, out: &mut Vec<NetworkAnomaly>) {
    for (source, target, link) in adj.links() {
        let (severity, score, description, recommendation) = match link.confidence {
            Some(Confidence::Suspected) if link.weight > config.suspected_min_weight => (
                Severity::Medium,
                link.weight - DEFAULT_EDGE_WEIGHT,
                format!("Suspected link carries a high weight of {:.2}", link.weight),
                "Seek evidence to confirm or discard this link",
            ),
            Some(Confidence::Confirmed) if link.weight < config.confirmed_max_weight => (
                Severity::Low,
                config.confirmed_max_weight - link.weight,
                format!("Confirmed link carries a low weight of {:.2}", link.weight),
                "Re-check the weight assigned to this confirmed link",
            ),
            _ => continue,
        };

        out.push(NetworkAnomaly {
            kind: AnomalyKind::SuspiciousLink,
            node_ids: vec![adj.id(source).to_string(), adj.id(target).to_string()],
            severity,
            score,
            description: format!("{} -> {}: {description}", adj.id(source), adj.id(target)),
            recommendation: recommendation.to_string(),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
