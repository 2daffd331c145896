//! `linkscope metrics` and `linkscope node`.

use std::io::{self, Write};

use clap::Args;
use linkscope_core::ErrorCode;
use linkscope_graph::{NetworkMetrics, NodeMetrics, RankedNode};
use serde::Serialize;

use super::{Context, SnapshotArg, fmt_score};
use crate::output::{CliError, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `linkscope metrics`.
#[derive(Args, Debug, Clone)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub input: SnapshotArg,
}

/// Arguments for `linkscope node`.
#[derive(Args, Debug, Clone)]
pub struct NodeArgs {
    #[command(flatten)]
    pub input: SnapshotArg,

    /// Node id to inspect.
    pub id: String,
}

/// Execute `linkscope metrics`.
pub fn run_metrics(args: &MetricsArgs, ctx: &Context) -> anyhow::Result<()> {
    let snapshot = ctx.load(&args.input)?;
    let metrics = ctx.analyzer.network_metrics(&snapshot.nodes, &snapshot.edges);
    render_mode(ctx.output, &metrics, render_metrics_text, render_metrics_pretty)
}

#[derive(Debug, Serialize)]
struct NodeOutput<'a> {
    id: &'a str,
    #[serde(flatten)]
    metrics: NodeMetrics,
}

/// Execute `linkscope node`.
pub fn run_node(args: &NodeArgs, ctx: &Context) -> anyhow::Result<()> {
    let snapshot = ctx.load(&args.input)?;
    let Some(metrics) = ctx
        .analyzer
        .node_metrics(&snapshot.nodes, &snapshot.edges, &args.id)
    else {
        render_error(
            ctx.output,
            &CliError::from_code(
                ErrorCode::NodeNotFound,
                format!("node `{}` not found", args.id),
            ),
        )?;
        anyhow::bail!("node `{}` not found", args.id);
    };

    let payload = NodeOutput {
        id: &args.id,
        metrics,
    };
    render_mode(ctx.output, &payload, render_node_text, render_node_pretty)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_metrics_text(m: &NetworkMetrics, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "nodes\t{}", m.node_count)?;
    writeln!(w, "edges\t{}", m.edge_count)?;
    writeln!(w, "density\t{}", m.density)?;
    writeln!(w, "avg_degree\t{}", m.avg_degree)?;
    writeln!(w, "avg_clustering\t{}", m.avg_clustering_coefficient)?;
    writeln!(w, "components\t{}", m.component_count)?;
    writeln!(w, "largest_component\t{}", m.largest_component_size)?;
    for (label, ranked) in rankings(m) {
        for entry in ranked {
            writeln!(w, "{label}\t{}\t{}", entry.id, entry.value)?;
        }
    }
    Ok(())
}

fn render_metrics_pretty(m: &NetworkMetrics, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Network metrics")?;
    pretty_kv(w, "Nodes", m.node_count.to_string())?;
    pretty_kv(w, "Edges", m.edge_count.to_string())?;
    pretty_kv(w, "Density", fmt_score(m.density))?;
    pretty_kv(w, "Average degree", fmt_score(m.avg_degree))?;
    pretty_kv(w, "Average clustering", fmt_score(m.avg_clustering_coefficient))?;
    pretty_kv(w, "Components", m.component_count.to_string())?;
    pretty_kv(w, "Largest component", m.largest_component_size.to_string())?;

    for (label, ranked) in rankings(m) {
        writeln!(w)?;
        pretty_section(w, &format!("Top by {label}"))?;
        if ranked.is_empty() {
            writeln!(w, "  (none)")?;
        }
        for (rank, entry) in ranked.iter().enumerate() {
            writeln!(w, "  {:>2}. {:<32} {}", rank + 1, entry.id, fmt_score(entry.value))?;
        }
    }
    Ok(())
}

fn rankings(m: &NetworkMetrics) -> [(&'static str, &[RankedNode]); 3] {
    [
        ("degree", m.top_by_degree.as_slice()),
        ("betweenness", m.top_by_betweenness.as_slice()),
        ("closeness", m.top_by_closeness.as_slice()),
    ]
}

fn render_node_text(node: &NodeOutput<'_>, w: &mut dyn Write) -> io::Result<()> {
    let m = &node.metrics;
    writeln!(
        w,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        node.id,
        m.degree,
        m.in_degree,
        m.out_degree,
        m.betweenness,
        m.closeness,
        m.clustering_coefficient
    )
}

fn render_node_pretty(node: &NodeOutput<'_>, w: &mut dyn Write) -> io::Result<()> {
    let m = &node.metrics;
    pretty_section(w, &format!("Node {}", node.id))?;
    pretty_kv(w, "Degree", format!("{} (in {}, out {})", m.degree, m.in_degree, m.out_degree))?;
    pretty_kv(w, "Betweenness", fmt_score(m.betweenness))?;
    pretty_kv(w, "Closeness", fmt_score(m.closeness))?;
    pretty_kv(w, "Clustering", fmt_score(m.clustering_coefficient))
}
