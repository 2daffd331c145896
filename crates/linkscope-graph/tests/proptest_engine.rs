use proptest::prelude::*;

use linkscope_core::model::{Edge, Node};
use linkscope_graph::NetworkAnalyzer;

/// Up to 12 nodes `n0..` and up to 30 edges between them (self-loops and
/// parallel edges included), plus a shuffled copy of the edge list.
fn arb_snapshot() -> impl Strategy<Value = (Vec<Node>, Vec<Edge>, Vec<Edge>)> {
    (1usize..12).prop_flat_map(|n| {
        proptest::collection::vec((0..n, 0..n), 0..30).prop_flat_map(move |pairs| {
            let edges: Vec<Edge> = pairs
                .iter()
                .map(|(s, t)| Edge::new(format!("n{s}"), format!("n{t}")))
                .collect();
            let nodes: Vec<Node> = (0..n).map(|i| Node::new(format!("n{i}"))).collect();
            (Just(nodes), Just(edges.clone()), Just(edges).prop_shuffle())
        })
    })
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn metrics_ignore_edge_order((nodes, edges, shuffled) in arb_snapshot()) {
        let analyzer = NetworkAnalyzer::default();
        prop_assert_eq!(
            analyzer.network_metrics(&nodes, &edges),
            analyzer.network_metrics(&nodes, &shuffled)
        );
        prop_assert_eq!(
            analyzer.detect_patterns(&nodes, &edges),
            analyzer.detect_patterns(&nodes, &shuffled)
        );
    }

    #[test]
    fn metrics_stay_in_bounds((nodes, edges, _shuffled) in arb_snapshot()) {
        let analyzer = NetworkAnalyzer::default();
        let m = analyzer.network_metrics(&nodes, &edges);
        prop_assert!(m.density.is_finite() && m.density >= 0.0);
        prop_assert!(m.avg_degree.is_finite() && m.avg_degree >= 0.0);
        prop_assert!((0.0..=1.0).contains(&m.avg_clustering_coefficient));
        prop_assert!(m.largest_component_size <= m.node_count);
        prop_assert!(m.component_count <= m.node_count);

        for node in &nodes {
            let nm = analyzer.node_metrics(&nodes, &edges, &node.id).expect("known node");
            prop_assert!((0.0..=1.0).contains(&nm.clustering_coefficient));
            prop_assert!((0.0..=1.0).contains(&nm.closeness));
            prop_assert!(nm.betweenness.is_finite() && nm.betweenness >= 0.0);
            prop_assert!(nm.betweenness <= 2.0 + 1e-9);
            prop_assert_eq!(nm.degree, nm.in_degree + nm.out_degree);
        }
    }

    #[test]
    fn paths_are_valid((nodes, edges, _shuffled) in arb_snapshot(), depth in 0usize..5) {
        let analyzer = NetworkAnalyzer::default();
        let source = &nodes[0].id;
        let target = &nodes[nodes.len() - 1].id;
        let linked = |a: &str, b: &str| {
            edges
                .iter()
                .any(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
        };

        let shortest = analyzer.shortest_path(&nodes, &edges, source, target);
        if let Some(result) = &shortest {
            prop_assert_eq!(result.distance, result.path.len() - 1);
            prop_assert_eq!(&result.path[0], source);
            prop_assert_eq!(&result.path[result.distance], target);
            for hop in result.path.windows(2) {
                prop_assert!(linked(hop[0].as_str(), hop[1].as_str()));
            }
        }

        let all = analyzer.all_paths(&nodes, &edges, source, target, Some(depth));
        for path in &all {
            prop_assert!(path.len() <= depth + 1);
            prop_assert_eq!(&path[0], source);
            prop_assert_eq!(&path[path.len() - 1], target);
            let mut unique = path.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), path.len());
            if let Some(result) = &shortest {
                prop_assert!(result.distance < path.len());
            }
        }
        if !all.is_empty() {
            prop_assert!(shortest.is_some());
        }
    }
}
