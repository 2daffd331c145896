#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use linkscope_core::config::resolve_config;
use linkscope_core::timing;
use linkscope_graph::NetworkAnalyzer;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "linkscope: network analysis for entity link graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit command timing report to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Emit JSON output (shorthand for `--format json`).
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Defaults to pretty on a terminal, text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Analysis config file (default: ./linkscope.toml, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Metrics",
        about = "Whole-network metrics",
        long_about = "Compute density, degree, centrality rankings, clustering and components for a snapshot.",
        after_help = "EXAMPLES:\n    # Summarise a snapshot\n    linkscope metrics graph.json\n\n    # Read from stdin, emit JSON\n    cat graph.json | linkscope metrics - --json"
    )]
    Metrics(cmd::metrics::MetricsArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Metrics for one node",
        long_about = "Show degree, betweenness, closeness and clustering for a single node.",
        after_help = "EXAMPLES:\n    # Inspect one entity\n    linkscope node graph.json person-17"
    )]
    Node(cmd::metrics::NodeArgs),

    #[command(
        next_help_heading = "Detection",
        about = "Detect triangles and stars",
        long_about = "List closed triads and hub-and-spoke stars in the snapshot.",
        after_help = "EXAMPLES:\n    # List patterns\n    linkscope patterns graph.json\n\n    # Emit machine-readable output\n    linkscope patterns graph.json --json"
    )]
    Patterns(cmd::detect::DetectArgs),

    #[command(
        next_help_heading = "Detection",
        about = "Detect anomalies",
        long_about = "Flag isolated, super-connected, bridge, structural-hole and suspicious-link anomalies, most severe first.",
        after_help = "EXAMPLES:\n    # List anomalies\n    linkscope anomalies graph.json\n\n    # Use stricter thresholds\n    linkscope anomalies graph.json --config strict.toml"
    )]
    Anomalies(cmd::detect::DetectArgs),

    #[command(
        next_help_heading = "Paths",
        about = "Shortest path between two nodes",
        long_about = "Find the fewest-hop path between two nodes, ignoring link direction.",
        after_help = "EXAMPLES:\n    # Shortest path\n    linkscope path graph.json A F"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Paths",
        about = "All simple paths between two nodes",
        long_about = "Enumerate simple paths between two nodes up to a hop limit.",
        after_help = "EXAMPLES:\n    # Paths of at most 4 hops\n    linkscope paths graph.json A F --max-depth 4\n\n    # Stop after 10 paths\n    linkscope paths graph.json A F --max-paths 10"
    )]
    Paths(cmd::path::AllPathsArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Connected components",
        long_about = "List connected components in discovery order (input order of their first node).",
        after_help = "EXAMPLES:\n    # List components\n    linkscope components graph.json"
    )]
    Components(cmd::components::ComponentsArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Full analysis report",
        long_about = "Metrics, patterns and anomalies for a snapshot in one document.",
        after_help = "EXAMPLES:\n    # Dashboard payload\n    linkscope report graph.json --json"
    )]
    Report(cmd::report::ReportArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LINKSCOPE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "linkscope=debug,info"
        } else {
            "linkscope=info,warn"
        })
    });

    let format = env::var("LINKSCOPE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let timing_enabled = cli.timing || timing::enabled_from_env();
    timing::set_enabled(timing_enabled);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let cwd = env::current_dir()?;
    let config = match resolve_config(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(err) => {
            render_error(output, &CliError::from_code(err.code(), err.to_string()))?;
            return Err(err.into());
        }
    };

    let ctx = cmd::Context {
        analyzer: NetworkAnalyzer::new(config),
        output,
    };

    let command_result = match &cli.command {
        Commands::Metrics(args) => {
            timing::timed("cmd.metrics", || cmd::metrics::run_metrics(args, &ctx))
        }
        Commands::Node(args) => timing::timed("cmd.node", || cmd::metrics::run_node(args, &ctx)),
        Commands::Patterns(args) => {
            timing::timed("cmd.patterns", || cmd::detect::run_patterns(args, &ctx))
        }
        Commands::Anomalies(args) => {
            timing::timed("cmd.anomalies", || cmd::detect::run_anomalies(args, &ctx))
        }
        Commands::Path(args) => timing::timed("cmd.path", || cmd::path::run_path(args, &ctx)),
        Commands::Paths(args) => {
            timing::timed("cmd.paths", || cmd::path::run_all_paths(args, &ctx))
        }
        Commands::Components(args) => timing::timed("cmd.components", || {
            cmd::components::run_components(args, &ctx)
        }),
        Commands::Report(args) => {
            timing::timed("cmd.report", || cmd::report::run_report(args, &ctx))
        }
    };

    if timing_enabled {
        let report = timing::take_report();
        if report.is_empty() {
            eprintln!("timing report: no samples recorded");
        } else {
            eprintln!("timing report:");
            eprint!("{report}");
            eprintln!("timing report (json):");
            eprintln!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    command_result
}
