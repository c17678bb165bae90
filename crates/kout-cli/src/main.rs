//! `kout` CLI - k-out and k-neighbor traversals over JSON property graphs
//!
//! Usage:
//!   `kout count ./graph.json 1 --depth 2 --label knows`
//!   `kout collect ./graph.json '"marko"' --depth 3 --direction both --format json`
//!   `kout info ./graph.json`

mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use kout_core::graph::MemoryGraph;
use kout_core::traversal::{OutputMode, PropertyFilter, TraversalParams, Traverser};
use kout_core::KoutConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "kout")]
#[command(author, version, about = "kout CLI - Bounded multi-hop graph traversal")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (missing file = defaults)
    #[arg(short, long, global = true, env = "KOUT_CONFIG", default_value = "kout.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
struct TraverseArgs {
    /// Path to the JSON graph document
    graph: PathBuf,

    /// Source vertex id (`42` or `"alice"`)
    source: String,

    /// Number of hops
    #[arg(short, long)]
    depth: i64,

    /// Edge direction: out, in, both
    #[arg(long)]
    direction: Option<String>,

    /// Edge label to follow (repeatable, default all)
    #[arg(short, long = "label")]
    labels: Vec<String>,

    /// Count a vertex only at its shortest depth
    #[arg(long)]
    nearest: Option<bool>,

    /// Edges read per vertex and hop (0 = unlimited)
    #[arg(long)]
    max_degree: Option<i64>,

    /// Edges examined per traversal (0 = unlimited)
    #[arg(long)]
    capacity: Option<i64>,

    /// Reported vertices (0 = unlimited)
    #[arg(long)]
    limit: Option<i64>,

    /// breadth_first or depth_first
    #[arg(long)]
    algorithm: Option<String>,

    /// within (k-neighbor) or exactly (k-out)
    #[arg(long)]
    scope: Option<String>,

    /// Property filter as JSON, e.g. '{"conditions":[{"op":"gt","key":"weight","value":0.5}]}'
    #[arg(long)]
    filter: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,
}

#[derive(Subcommand)]
enum Commands {
    /// Count vertices reachable from a source
    Count(TraverseArgs),

    /// List vertices reachable from a source
    Collect(TraverseArgs),

    /// Show graph statistics
    Info {
        /// Path to the JSON graph document
        graph: PathBuf,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = KoutConfig::load_from_path(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    config.validate()?;
    init_tracing(&config);

    match cli.command {
        Commands::Count(args) => run_traversal(&config, args, OutputMode::Count),
        Commands::Collect(args) => run_traversal(&config, args, OutputMode::Collect),
        Commands::Info { graph } => {
            let graph_data = load_graph(&graph)?;
            output::print_info(&graph, &graph_data);
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(config: &KoutConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,kout_core={}", config.logging.level)));
    let json = config.logging.format == "json";
    let text_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .init();
}

fn load_graph(path: &Path) -> Result<MemoryGraph> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading graph {}", path.display()))?;
    let graph = MemoryGraph::from_json(&json)
        .with_context(|| format!("parsing graph {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "Graph loaded"
    );
    Ok(graph)
}

fn run_traversal(config: &KoutConfig, args: TraverseArgs, mode: OutputMode) -> Result<()> {
    let graph = load_graph(&args.graph)?;
    let filter = args
        .filter
        .as_deref()
        .map(serde_json::from_str::<PropertyFilter>)
        .transpose()
        .context("parsing --filter")?;

    let params = TraversalParams {
        source: args.source,
        direction: args.direction,
        labels: args.labels,
        max_depth: Some(args.depth),
        nearest: args.nearest,
        max_degree: args.max_degree,
        capacity: args.capacity,
        limit: args.limit,
        algorithm: args.algorithm,
        scope: args.scope,
        filter,
        mode,
    };
    let request = params.resolve(&graph, &config.traversal)?;
    let result = Traverser::new(&graph)
        .with_parallel(config.parallel.clone())?
        .traverse(&request)?;

    output::print_result(&result, args.format)
}
