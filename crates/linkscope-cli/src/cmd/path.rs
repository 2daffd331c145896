//! `linkscope path` and `linkscope paths`.

use std::io::{self, Write};

use clap::Args;
use linkscope_graph::{NetworkAnalyzer, PathResult};
use serde::Serialize;

use super::{Context, SnapshotArg};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `linkscope path`.
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    #[command(flatten)]
    pub input: SnapshotArg,

    /// Source node id.
    pub from: String,

    /// Target node id.
    pub to: String,
}

/// Arguments for `linkscope paths`.
#[derive(Args, Debug, Clone)]
pub struct AllPathsArgs {
    #[command(flatten)]
    pub input: SnapshotArg,

    /// Source node id.
    pub from: String,

    /// Target node id.
    pub to: String,

    /// Longest path to explore, in hops (default: `paths.max_depth`).
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Stop after this many paths (default: `paths.max_paths`).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_paths: Option<u64>,
}

/// Execute `linkscope path`. An unreachable target is not an error.
pub fn run_path(args: &PathArgs, ctx: &Context) -> anyhow::Result<()> {
    let snapshot = ctx.load(&args.input)?;
    let result = ctx
        .analyzer
        .shortest_path(&snapshot.nodes, &snapshot.edges, &args.from, &args.to);
    render_mode(
        ctx.output,
        &result,
        |r, w| render_path_text(r.as_ref(), w),
        |r, w| render_path_pretty(r.as_ref(), w),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AllPathsOutput {
    count: usize,
    paths: Vec<Vec<String>>,
}

/// Execute `linkscope paths`.
pub fn run_all_paths(args: &AllPathsArgs, ctx: &Context) -> anyhow::Result<()> {
    let snapshot = ctx.load(&args.input)?;

    let mut config = ctx.analyzer.config().clone();
    if let Some(cap) = args.max_paths {
        config.paths.max_paths = Some(usize::try_from(cap).unwrap_or(usize::MAX));
    }
    let analyzer = NetworkAnalyzer::new(config);

    let paths = analyzer.all_paths(
        &snapshot.nodes,
        &snapshot.edges,
        &args.from,
        &args.to,
        args.max_depth,
    );
    let payload = AllPathsOutput {
        count: paths.len(),
        paths,
    };
    render_mode(ctx.output, &payload, render_all_text, render_all_pretty)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_path_text(result: Option<&PathResult>, w: &mut dyn Write) -> io::Result<()> {
    match result {
        Some(found) => writeln!(w, "{}\t{}", found.distance, found.path.join(",")),
        None => writeln!(w, "none"),
    }
}

fn render_path_pretty(result: Option<&PathResult>, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Shortest path")?;
    match result {
        Some(found) => {
            pretty_kv(w, "Distance", found.distance.to_string())?;
            pretty_kv(w, "Path", found.path.join(" -> "))
        }
        None => writeln!(w, "No path between these nodes."),
    }
}

fn render_all_text(payload: &AllPathsOutput, w: &mut dyn Write) -> io::Result<()> {
    for path in &payload.paths {
        writeln!(w, "{}\t{}", path.len().saturating_sub(1), path.join(","))?;
    }
    Ok(())
}

fn render_all_pretty(payload: &AllPathsOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Paths ({})", payload.count))?;
    if payload.paths.is_empty() {
        writeln!(w, "No paths within the depth limit.")?;
    }
    for (i, path) in payload.paths.iter().enumerate() {
        writeln!(w, "  {:>3}. {}", i + 1, path.join(" -> "))?;
    }
    Ok(())
}
