//! `explore`: accumulate several traces into one session graph.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use pattern_graph_core::{
    GraphConfig, GraphSession, GraphSnapshot, Highlight, LayoutSpec, NodeId, PatternGraphQuery,
    TraceOutcome,
};

use super::shared::{layout_spec, load_gateway, render, report, LayoutReport};
use crate::error::{CliError, CliExitCode};

#[derive(Args, Debug)]
pub struct ExploreArgs {
    /// Pattern store fixture (JSON)
    #[arg(long)]
    pub store: PathBuf,

    /// Pattern to trace; repeat to accumulate several traces in order
    #[arg(short, long = "pattern", required = true)]
    pub patterns: Vec<String>,

    /// Maximum depth for every trace
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Lay out the accumulated graph once all traces are merged
    #[arg(long)]
    pub layout: Option<String>,

    /// Highlight the connected component of this node id (kb:name)
    #[arg(long)]
    pub select: Option<String>,

    /// Answer reverse lookups by scanning instead of the index
    #[arg(long)]
    pub scan: bool,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Serialize)]
struct PatternOutcome {
    pattern: String,
    #[serde(flatten)]
    outcome: TraceOutcome,
}

#[derive(Debug, Serialize)]
struct ExploreReport {
    traces: Vec<PatternOutcome>,
    graph: GraphSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    layout: Option<LayoutReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlight: Option<Highlight>,
}

pub async fn handle_explore(args: ExploreArgs, config: GraphConfig) -> i32 {
    match run(&args, config).await {
        Ok((output, missing)) => {
            println!("{}", output);
            if missing > 0 {
                warn!(missing, "some patterns were not found");
                CliExitCode::NotFound.into()
            } else {
                CliExitCode::Success.into()
            }
        }
        Err(e) => report("explore", &e),
    }
}

/// Returns the rendered report and the number of patterns not found.
async fn run(args: &ExploreArgs, config: GraphConfig) -> Result<(String, usize), CliError> {
    let gateway = Arc::new(load_gateway(&args.store, args.scan)?);
    let base_spec = LayoutSpec::from_config(&config.layout);
    let mut session = GraphSession::new(gateway, config);

    let mut traces = Vec::with_capacity(args.patterns.len());
    for pattern in &args.patterns {
        let mut query = PatternGraphQuery::new(pattern.as_str());
        if let Some(depth) = args.depth {
            query = query.max_depth(depth);
        }
        let outcome = session.trace(&query).await?;
        traces.push(PatternOutcome {
            pattern: pattern.clone(),
            outcome,
        });
    }
    let missing = traces
        .iter()
        .filter(|t| matches!(t.outcome, TraceOutcome::NotFound { .. }))
        .count();
    info!(
        traces = traces.len(),
        nodes = session.state().node_count(),
        edges = session.state().edge_count(),
        "exploration complete"
    );

    let layout = match &args.layout {
        Some(name) => {
            let outcome = session.layout(&layout_spec(name, &base_spec)?, None)?;
            Some(LayoutReport::from(outcome))
        }
        None => None,
    };

    let highlight = match &args.select {
        Some(selected) => {
            let selected = NodeId::from(selected.as_str());
            let highlight = session.select(&selected).cloned().ok_or_else(|| {
                CliError::InvalidArgument(format!("selected node {selected} is not in the graph"))
            })?;
            Some(highlight)
        }
        None => None,
    };

    let output = render(
        &ExploreReport {
            traces,
            graph: session.state().snapshot(),
            layout,
            highlight,
        },
        args.compact,
    )?;
    Ok((output, missing))
}
