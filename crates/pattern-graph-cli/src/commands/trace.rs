//! `trace`: answer one pattern graph query.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use pattern_graph_core::{
    compute_layout, highlight_component, run_query, GraphConfig, Highlight, LayoutSpec, NodeId,
    PatternGraphQuery, PatternGraphResponse,
};

use super::shared::{layout_spec, load_gateway, render, report, LayoutReport};
use crate::error::{CliError, CliExitCode};

#[derive(Args, Debug)]
pub struct TraceArgs {
    /// Pattern store fixture (JSON)
    #[arg(long)]
    pub store: PathBuf,

    /// Origin pattern name, with or without the PTRN| prefix
    #[arg(short, long)]
    pub pattern: String,

    /// Knowledge base of the origin; searched lowest level first when omitted
    #[arg(long)]
    pub kb: Option<String>,

    /// Maximum trace depth (defaults to trace.default_max_depth)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Lay out the result: hierarchical-bottom-up, radial-out, ...
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
struct TraceReport {
    #[serde(flatten)]
    response: PatternGraphResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    layout: Option<LayoutReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlight: Option<Highlight>,
}

pub async fn handle_trace(args: TraceArgs, config: GraphConfig) -> i32 {
    match run(&args, &config).await {
        Ok((output, not_found)) => {
            println!("{}", output);
            if not_found {
                warn!(pattern = %args.pattern, "pattern not found");
                CliExitCode::NotFound.into()
            } else {
                CliExitCode::Success.into()
            }
        }
        Err(e) => report("trace", &e),
    }
}

async fn run(args: &TraceArgs, config: &GraphConfig) -> Result<(String, bool), CliError> {
    let gateway = load_gateway(&args.store, args.scan)?;

    let mut query = PatternGraphQuery::new(args.pattern.as_str());
    if let Some(kb) = &args.kb {
        query = query.kb(kb.as_str());
    }
    if let Some(depth) = args.depth {
        query = query.max_depth(depth);
    }

    let response = run_query(&gateway, &query, config).await?;
    info!(
        nodes = response.total_nodes,
        edges = response.total_edges,
        depth_reached = response.depth_reached,
        "trace complete"
    );

    let layout = match &args.layout {
        Some(name) => {
            let spec = layout_spec(name, &LayoutSpec::from_config(&config.layout))?;
            let outcome = compute_layout(&response.nodes, &response.edges, &spec, None)?;
            Some(LayoutReport::from(outcome))
        }
        None => None,
    };

    let highlight = match &args.select {
        Some(selected) => {
            let selected = NodeId::from(selected.as_str());
            if !response.nodes.iter().any(|n| n.id == selected) {
                return Err(CliError::InvalidArgument(format!(
                    "selected node {selected} is not in the traced graph"
                )));
            }
            Some(highlight_component(&selected, &response.edges))
        }
        None => None,
    };

    let not_found = response.not_found;
    let output = render(
        &TraceReport {
            response,
            layout,
            highlight,
        },
        args.compact,
    )?;
    Ok((output, not_found))
}
