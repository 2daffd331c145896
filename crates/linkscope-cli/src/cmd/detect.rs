//! `linkscope patterns` and `linkscope anomalies`.

use std::io::{self, Write};

use clap::Args;
use linkscope_graph::{NetworkAnomaly, NetworkPattern};

use super::{Context, SnapshotArg, fmt_score};
use crate::output::{pretty_section, render_mode};

/// Arguments for `linkscope patterns` and `linkscope anomalies`.
#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    #[command(flatten)]
    pub input: SnapshotArg,
}

/// Execute `linkscope patterns`.
pub fn run_patterns(args: &DetectArgs, ctx: &Context) -> anyhow::Result<()> {
    let snapshot = ctx.load(&args.input)?;
    let patterns = ctx.analyzer.detect_patterns(&snapshot.nodes, &snapshot.edges);
    render_mode(ctx.output, patterns.as_slice(), render_patterns_text, render_patterns_pretty)
}

/// Execute `linkscope anomalies`.
pub fn run_anomalies(args: &DetectArgs, ctx: &Context) -> anyhow::Result<()> {
    let snapshot = ctx.load(&args.input)?;
    let anomalies = ctx.analyzer.detect_anomalies(&snapshot.nodes, &snapshot.edges);
    render_mode(ctx.output, anomalies.as_slice(), render_anomalies_text, render_anomalies_pretty)
}

fn render_patterns_text(patterns: &[NetworkPattern], w: &mut dyn Write) -> io::Result<()> {
    for p in patterns {
        writeln!(
            w,
            "{}\t{}\t{}",
            p.kind,
            p.significance,
            p.nodes.join(",")
        )?;
    }
    Ok(())
}

fn render_patterns_pretty(patterns: &[NetworkPattern], w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Patterns ({})", patterns.len()))?;
    if patterns.is_empty() {
        writeln!(w, "No patterns found.")?;
    }
    for p in patterns {
        writeln!(
            w,
            "  {:<9} {}  {}",
            p.kind,
            fmt_score(p.significance),
            p.description
        )?;
        writeln!(w, "            {}", p.nodes.join(", "))?;
    }
    Ok(())
}

fn render_anomalies_text(anomalies: &[NetworkAnomaly], w: &mut dyn Write) -> io::Result<()> {
    for a in anomalies {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            a.severity,
            a.kind,
            a.score,
            a.node_ids.join(",")
        )?;
    }
    Ok(())
}

fn render_anomalies_pretty(anomalies: &[NetworkAnomaly], w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Anomalies ({})", anomalies.len()))?;
    if anomalies.is_empty() {
        writeln!(w, "No anomalies detected.")?;
    }
    for a in anomalies {
        writeln!(
            w,
            "  [{:<8}] {:<16} {}  {}",
            a.severity,
            a.kind,
            fmt_score(a.score),
            a.node_ids.join(" -> ")
        )?;
        writeln!(w, "             {}", a.description)?;
        writeln!(w, "             → {}", a.recommendation)?;
    }
    Ok(())
}
