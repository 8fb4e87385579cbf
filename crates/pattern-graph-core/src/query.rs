//! Consumer-facing pattern graph query.
//!
//! One request/response pair for a UI layer: `{pattern_name, kb_id?,
//! max_depth?}` in, `{nodes, edges, origin, total_nodes, total_edges}` out.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::{GraphConfig, TraceConfig};
use crate::error::{GraphError, GraphResult, MSG_PATTERN_NOT_FOUND};
use crate::gateway::PatternGateway;
use crate::tracer::{trace_with_timeout, TraceParams, TraceResult};
use crate::types::{KbId, PatternEdge, PatternNode, REFERENCE_PREFIX};

/// Request for the neighbourhood of one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternGraphQuery {
    pub pattern_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kb_id: Option<KbId>,

    /// 1..=`trace.max_depth_limit`; `None` uses `trace.default_max_depth`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl PatternGraphQuery {
    pub fn new(pattern_name: impl Into<String>) -> Self {
        Self {
            pattern_name: pattern_name.into(),
            kb_id: None,
            max_depth: None,
        }
    }

    /// Builder: pin the origin to a KB.
    #[must_use]
    pub fn kb(mut self, kb_id: impl Into<KbId>) -> Self {
        self.kb_id = Some(kb_id.into());
        self
    }

    /// Builder: set max depth.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn origin_name(&self) -> &str {
        self.pattern_name
            .strip_prefix(REFERENCE_PREFIX)
            .unwrap_or(&self.pattern_name)
    }

    /// Requested depth, defaulted and checked against the configured limit.
    pub fn resolve_depth(&self, trace: &TraceConfig) -> GraphResult<usize> {
        let depth = self.max_depth.unwrap_or(trace.default_max_depth);
        if depth == 0 || depth > trace.max_depth_limit {
            return Err(GraphError::InvalidDepth {
                requested: depth,
                max: trace.max_depth_limit,
            });
        }
        Ok(depth)
    }

    pub fn to_params(&self, config: &GraphConfig) -> GraphResult<TraceParams> {
        let mut params = TraceParams::new(self.origin_name())
            .max_depth(self.resolve_depth(&config.trace)?)
            .sizing(config.layout.sizing());
        params.kb_id = self.kb_id.clone();
        params.validate()?;
        Ok(params)
    }
}

/// Response for one [`PatternGraphQuery`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternGraphResponse {
    pub nodes: Vec<PatternNode>,
    pub edges: Vec<PatternEdge>,
    pub origin: Option<PatternNode>,
    pub total_nodes: usize,
    pub total_edges: usize,
    pub depth_reached: usize,
    /// Origin pattern does not exist; everything else is empty.
    #[serde(default)]
    pub not_found: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<TraceResult> for PatternGraphResponse {
    fn from(result: TraceResult) -> Self {
        let origin = result.origin_node().cloned();
        let message = result.not_found.then(|| MSG_PATTERN_NOT_FOUND.to_string());
        Self {
            total_nodes: result.nodes.len(),
            total_edges: result.edges.len(),
            depth_reached: result.depth_reached,
            not_found: result.not_found,
            nodes: result.nodes,
            edges: result.edges,
            unresolved: result.unresolved,
            origin,
            message,
        }
    }
}

/// Answer one query against `gateway` under `config`'s depth and time limits.
///
/// # Returns
/// * `Ok(PatternGraphResponse)` - `not_found` set when the origin is absent
/// * `Err(GraphError::InvalidDepth)` - depth 0 or above the configured limit
/// * `Err(GraphError::TraceTimeout)` / `Err(GraphError::StoreUnavailable)` - retryable
#[instrument(skip(gateway, config), fields(pattern = %query.origin_name()))]
pub async fn run_query<G>(
    gateway: &G,
    query: &PatternGraphQuery,
    config: &GraphConfig,
) -> GraphResult<PatternGraphResponse>
where
    G: PatternGateway + ?Sized,
{
    let params = query.to_params(config)?;
    let result = trace_with_timeout(gateway, &params, config.trace_timeout()).await?;
    Ok(result.into())
}
