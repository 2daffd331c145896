//! Known-topology regression tests for the analysis engine.
//!
//! Each test uses a hand-crafted snapshot with known properties. Expected
//! values are worked out by hand and hardcoded, so any algorithm change
//! that shifts them is caught.

use linkscope_core::model::{Edge, Node};
use linkscope_graph::{AnomalyKind, NetworkAnalyzer, PatternKind, Severity};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn nodes(ids: &[&str]) -> Vec<Node> {
    ids.iter().map(|id| Node::new(*id)).collect()
}

fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs.iter().map(|(s, t)| Edge::new(*s, *t)).collect()
}

fn analyzer() -> NetworkAnalyzer {
    NetworkAnalyzer::default()
}

/// Directed 5-clique over `ids`, one edge per unordered pair.
fn clique(ids: &[&str]) -> Vec<Edge> {
    let mut out = Vec::new();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            out.push(Edge::new(*a, *b));
        }
    }
    out
}

// ===========================================================================
// Topology 1: Empty snapshot
// ===========================================================================

#[test]
fn empty_snapshot_is_all_zero() {
    let m = analyzer().network_metrics(&[], &[]);
    assert_eq!(m.node_count, 0);
    assert_eq!(m.edge_count, 0);
    assert!(m.density.abs() < f64::EPSILON);
    assert!(m.avg_degree.abs() < f64::EPSILON);
    assert!(m.avg_clustering_coefficient.abs() < f64::EPSILON);
    assert_eq!(m.component_count, 0);
    assert_eq!(m.largest_component_size, 0);
    assert!(!m.density.is_nan() && !m.avg_degree.is_nan());

    assert!(analyzer().detect_patterns(&[], &[]).is_empty());
    assert!(analyzer().detect_anomalies(&[], &[]).is_empty());
    assert!(analyzer().shortest_path(&[], &[], "A", "B").is_none());
}

// ===========================================================================
// Topology 2: Triangle (A → B → C → A)
//
// Properties:
//   - One TRIANGLE pattern {A, B, C}.
//   - Every node has 2 undirected neighbours and clustering 1.0.
// ===========================================================================

#[test]
fn triangle_is_detected_and_fully_clustered() {
    let ns = nodes(&["A", "B", "C"]);
    let es = edges(&[("A", "B"), ("B", "C"), ("C", "A")]);

    let patterns = analyzer().detect_patterns(&ns, &es);
    let triangles: Vec<_> = patterns
        .iter()
        .filter(|p| p.kind == PatternKind::Triangle)
        .collect();
    assert_eq!(triangles.len(), 1);
    assert_eq!(triangles[0].nodes, vec!["A", "B", "C"]);

    for id in ["A", "B", "C"] {
        let m = analyzer().node_metrics(&ns, &es, id).expect("node");
        assert_eq!(m.degree, 2, "{id}");
        assert!((m.clustering_coefficient - 1.0).abs() < f64::EPSILON, "{id}");
    }

    let m = analyzer().network_metrics(&ns, &es);
    assert!((m.avg_clustering_coefficient - 1.0).abs() < f64::EPSILON);
    assert!((m.density - 0.5).abs() < 1e-12);
}

// ===========================================================================
// Topology 3: Star (H → L1..L5)
//
// Properties:
//   - H has degree 5 and tops topByDegree.
//   - One STAR [H, L1..L5] with significance 5/6.
//   - Every leaf is less close than H.
// ===========================================================================

#[test]
fn star_centre_dominates() {
    let ns = nodes(&["H", "L1", "L2", "L3", "L4", "L5"]);
    let es = edges(&[("H", "L1"), ("H", "L2"), ("H", "L3"), ("H", "L4"), ("H", "L5")]);

    let m = analyzer().network_metrics(&ns, &es);
    assert_eq!(m.top_by_degree[0].id, "H");
    assert!((m.top_by_degree[0].value - 5.0).abs() < f64::EPSILON);
    assert_eq!(m.top_by_closeness[0].id, "H");

    let stars: Vec<_> = analyzer()
        .detect_patterns(&ns, &es)
        .into_iter()
        .filter(|p| p.kind == PatternKind::Star)
        .collect();
    assert_eq!(stars.len(), 1);
    assert_eq!(stars[0].nodes, vec!["H", "L1", "L2", "L3", "L4", "L5"]);
    assert!((stars[0].significance - 5.0 / 6.0).abs() < 1e-12);

    let hub = analyzer().node_metrics(&ns, &es, "H").expect("hub");
    for leaf in ["L1", "L2", "L3", "L4", "L5"] {
        let m = analyzer().node_metrics(&ns, &es, leaf).expect("leaf");
        assert!(m.closeness < hub.closeness, "{leaf}");
    }
}

// ===========================================================================
// Topology 4: Ring of 11 plus one isolated node
//
// Properties:
//   - Exactly one ISOLATED anomaly: the loner, MEDIUM, score 0.6.
//   - No ring node has degree 1, so no LOW isolation flags.
// ===========================================================================

#[test]
fn single_isolated_node_in_large_graph() {
    let mut ids: Vec<String> = (0..11).map(|i| format!("r{i}")).collect();
    let mut es: Vec<Edge> = (0..11)
        .map(|i| Edge::new(ids[i].clone(), ids[(i + 1) % 11].clone()))
        .collect();
    ids.push("loner".to_string());
    let ns: Vec<Node> = ids.iter().map(|id| Node::new(id.clone())).collect();
    es.reverse();

    let anomalies = analyzer().detect_anomalies(&ns, &es);
    let isolated: Vec<_> = anomalies
        .iter()
        .filter(|a| a.kind == AnomalyKind::Isolated)
        .collect();
    assert_eq!(isolated.len(), 1);
    assert_eq!(isolated[0].node_ids, vec!["loner"]);
    assert_eq!(isolated[0].severity, Severity::Medium);
    assert!((isolated[0].score - 0.6).abs() < f64::EPSILON);

    let m = analyzer().network_metrics(&ns, &es);
    assert_eq!(m.component_count, 2);
    assert_eq!(m.largest_component_size, 11);
}

// ===========================================================================
// Topology 5: Two 5-cliques joined through an intermediary
//
//   {a1..a5} (clique) ⇄ X ⇄ {b1..b5} (clique)
//
// X links both ways to a1 and b1: total degree 4, two neighbours.
// Average degree is 48/11, so X sits below it, while every cross-cluster
// shortest path runs through X.
// ===========================================================================

#[test]
fn intermediary_is_flagged_as_bridge() {
    let a = ["a1", "a2", "a3", "a4", "a5"];
    let b = ["b1", "b2", "b3", "b4", "b5"];
    let mut ids: Vec<&str> = a.to_vec();
    ids.extend(b);
    ids.push("X");

    let mut es = clique(&a);
    es.extend(clique(&b));
    es.extend(edges(&[("X", "a1"), ("a1", "X"), ("X", "b1"), ("b1", "X")]));
    let ns = nodes(&ids);

    let anomalies = analyzer().detect_anomalies(&ns, &es);
    let bridges: Vec<_> = anomalies
        .iter()
        .filter(|an| an.kind == AnomalyKind::Bridge)
        .collect();
    assert_eq!(bridges.len(), 1);
    assert_eq!(bridges[0].node_ids, vec!["X"]);
    assert_eq!(bridges[0].severity, Severity::High);
    // 50 ordered cross pairs, scaled by 2 / (10 * 9).
    assert!((bridges[0].score - 100.0 / 90.0).abs() < 1e-9);

    let with_x = analyzer().network_metrics(&ns, &es);
    assert_eq!(with_x.component_count, 1);

    let without: Vec<Node> = ns.iter().filter(|n| n.id != "X").cloned().collect();
    let split = analyzer().network_metrics(&without, &es);
    assert_eq!(split.component_count, 2);
    assert_eq!(split.largest_component_size, 5);
}

// ===========================================================================
// Topology 6: Chain (A - B - C - D)
// ===========================================================================

#[test]
fn chain_paths() {
    let ns = nodes(&["A", "B", "C", "D"]);
    let es = edges(&[("A", "B"), ("B", "C"), ("C", "D")]);

    let path = analyzer().shortest_path(&ns, &es, "A", "D").expect("path");
    assert_eq!(path.path, vec!["A", "B", "C", "D"]);
    assert_eq!(path.distance, 3);

    let same = analyzer().shortest_path(&ns, &es, "A", "A").expect("path");
    assert_eq!(same.path, vec!["A"]);
    assert_eq!(same.distance, 0);

    assert_eq!(
        analyzer().all_paths(&ns, &es, "A", "D", None),
        vec![vec!["A", "B", "C", "D"]]
    );
    assert!(analyzer().all_paths(&ns, &es, "A", "D", Some(2)).is_empty());
}

// ===========================================================================
// Determinism
// ===========================================================================

#[test]
fn metrics_identical_across_calls_and_edge_orders() {
    let ids = ["A", "B", "C", "D", "E", "F", "G"];
    let ns = nodes(&ids);
    let forward = edges(&[
        ("A", "B"),
        ("B", "C"),
        ("C", "A"),
        ("C", "D"),
        ("D", "E"),
        ("E", "F"),
        ("F", "D"),
        ("G", "A"),
        ("G", "E"),
    ]);
    let mut reversed = forward.clone();
    reversed.reverse();
    let mut rotated = forward.clone();
    rotated.rotate_left(4);

    let first = analyzer().network_metrics(&ns, &forward);
    assert_eq!(first, analyzer().network_metrics(&ns, &forward));
    assert_eq!(first, analyzer().network_metrics(&ns, &reversed));
    assert_eq!(first, analyzer().network_metrics(&ns, &rotated));

    let report = analyzer().report(&ns, &forward);
    assert_eq!(report.fingerprint, analyzer().report(&ns, &rotated).fingerprint);
}

#[test]
fn unknown_endpoints_contribute_nothing() {
    let ns = nodes(&["A", "B"]);
    let clean = analyzer().network_metrics(&ns, &edges(&[("A", "B")]));
    let noisy = analyzer().network_metrics(
        &ns,
        &edges(&[("A", "B"), ("A", "ghost"), ("ghost", "B"), ("x", "y")]),
    );
    assert_eq!(clean, noisy);
}
