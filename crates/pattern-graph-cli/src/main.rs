//! Pattern Graph CLI
//!
//! Loads a pattern store fixture (JSON) into the in-memory gateway and runs
//! graph queries against it, printing JSON on stdout. Logs go to stderr.
//!
//! # Commands
//!
//! - `trace`: one consumer query, optionally with layout and highlight
//! - `explore`: several traces accumulated into one session graph
//!
//! # Exit codes
//!
//! 0 ok, 1 general error, 2 trace timeout, 3 store unavailable,
//! 4 invalid input, 5 pattern not found.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use pattern_graph_core::{GraphConfig, LoggingConfig};

mod commands;
mod error;

use error::{exit_code_for_error, CliError};

/// Pattern Graph CLI - trace and explore pattern hierarchies
#[derive(Parser)]
#[command(name = "pattern-graph-cli")]
#[command(version)]
#[command(about = "Trace and explore hierarchical pattern-relationship graphs")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (TOML). Defaults to config/default.toml + environment.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace the neighbourhood of one pattern
    ///
    /// Prints the query response; with --layout adds node positions, with
    /// --select adds the highlighted component of a node.
    Trace(commands::trace::TraceArgs),
    /// Accumulate several traces into one graph
    ///
    /// Traces every --pattern in order into a single session and prints the
    /// merged graph together with the outcome of each trace.
    Explore(commands::explore::ExploreArgs),
}

fn load_config(path: Option<&PathBuf>) -> Result<GraphConfig, CliError> {
    let config = match path {
        Some(path) => GraphConfig::from_file(path)?,
        None => GraphConfig::load()?,
    };
    Ok(config)
}

fn init_logging(verbose: u8, logging: &LoggingConfig) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.pretty().init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_code_for_error(&e).into());
        }
    };
    init_logging(cli.verbose, &config.logging);

    let exit_code = match cli.command {
        Commands::Trace(args) => commands::trace::handle_trace(args, config).await,
        Commands::Explore(args) => commands::explore::handle_explore(args, config).await,
    };

    std::process::exit(exit_code);
}
