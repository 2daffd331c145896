//! `linkscope report`: metrics, patterns and anomalies in one document.

use std::io::{self, Write};

use clap::Args;
use linkscope_graph::{NetworkReport, Severity};

use super::{Context, SnapshotArg, fmt_score};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `linkscope report`.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: SnapshotArg,
}

/// Execute `linkscope report`.
pub fn run_report(args: &ReportArgs, ctx: &Context) -> anyhow::Result<()> {
    let snapshot = ctx.load(&args.input)?;
    let report = ctx.analyzer.report(&snapshot.nodes, &snapshot.edges);
    render_mode(ctx.output, &report, render_report_text, render_report_pretty)
}

fn severity_count(report: &NetworkReport, severity: Severity) -> usize {
    report
        .anomalies
        .iter()
        .filter(|a| a.severity == severity)
        .count()
}

fn render_report_text(report: &NetworkReport, w: &mut dyn Write) -> io::Result<()> {
    let m = &report.metrics;
    writeln!(w, "fingerprint\t{}", report.fingerprint)?;
    writeln!(w, "nodes\t{}", m.node_count)?;
    writeln!(w, "edges\t{}", m.edge_count)?;
    writeln!(w, "density\t{}", m.density)?;
    writeln!(w, "components\t{}", m.component_count)?;
    writeln!(w, "patterns\t{}", report.patterns.len())?;
    writeln!(w, "anomalies\t{}", report.anomalies.len())?;
    for a in &report.anomalies {
        writeln!(w, "anomaly\t{}\t{}\t{}", a.severity, a.kind, a.node_ids.join(","))?;
    }
    Ok(())
}

fn render_report_pretty(report: &NetworkReport, w: &mut dyn Write) -> io::Result<()> {
    let m = &report.metrics;
    pretty_section(w, "Network report")?;
    pretty_kv(w, "Fingerprint", &report.fingerprint)?;
    pretty_kv(w, "Nodes", m.node_count.to_string())?;
    pretty_kv(w, "Edges", m.edge_count.to_string())?;
    pretty_kv(w, "Density", fmt_score(m.density))?;
    pretty_kv(w, "Average clustering", fmt_score(m.avg_clustering_coefficient))?;
    pretty_kv(
        w,
        "Components",
        format!("{} (largest {})", m.component_count, m.largest_component_size),
    )?;
    let shape = if m.is_flat() {
        "no links"
    } else if m.is_fragmented() {
        "fragmented"
    } else {
        "connected"
    };
    pretty_kv(w, "Structure", shape)?;
    pretty_kv(w, "Patterns", report.patterns.len().to_string())?;
    pretty_kv(
        w,
        "Anomalies",
        format!(
            "{} ({} critical, {} high)",
            report.anomalies.len(),
            severity_count(report, Severity::Critical),
            severity_count(report, Severity::High)
        ),
    )?;

    if !report.anomalies.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Most severe")?;
        for a in report.anomalies.iter().take(5) {
            writeln!(w, "  [{:<8}] {}", a.severity, a.description)?;
        }
    }
    Ok(())
}
