//! Subcommand handlers. Each reads a snapshot, runs one engine entry point
//! and renders the result in the requested [`OutputMode`].

pub mod components;
pub mod detect;
pub mod metrics;
pub mod path;
pub mod report;

use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use linkscope_core::model::GraphSnapshot;
use linkscope_graph::NetworkAnalyzer;
use tracing::debug;

use crate::output::{CliError, OutputMode, render_error};

/// Shared state for one CLI invocation.
#[derive(Debug)]
pub struct Context {
    pub analyzer: NetworkAnalyzer,
    pub output: OutputMode,
}

/// Positional snapshot argument shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArg {
    /// Snapshot JSON file (`{"nodes": [...], "edges": [...]}`), or `-` for stdin.
    pub snapshot: PathBuf,
}

impl Context {
    /// Load the snapshot, rendering a coded error on failure.
    pub fn load(&self, arg: &SnapshotArg) -> anyhow::Result<GraphSnapshot> {
        match read_snapshot(&arg.snapshot) {
            Ok(snapshot) => {
                debug!(
                    nodes = snapshot.nodes.len(),
                    edges = snapshot.edges.len(),
                    "snapshot ready"
                );
                Ok(snapshot)
            }
            Err(err) => {
                render_error(self.output, &CliError::from_code(err.code(), err.to_string()))?;
                Err(anyhow::Error::new(err)
                    .context(format!("loading {}", arg.snapshot.display())))
            }
        }
    }
}

fn read_snapshot(path: &Path) -> Result<GraphSnapshot, linkscope_core::SnapshotError> {
    if path == Path::new("-") {
        GraphSnapshot::from_reader(io::stdin().lock())
    } else {
        GraphSnapshot::load(path)
    }
}

/// Fixed-precision rendering for scores in human output.
pub fn fmt_score(value: f64) -> String {
    format!("{value:.4}")
}
