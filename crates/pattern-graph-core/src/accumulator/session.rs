//! One interactive exploration session.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::config::GraphConfig;
use crate::error::GraphResult;
use crate::gateway::PatternGateway;
use crate::highlight::{highlight_component, Highlight};
use crate::layout::{compute_layout, ForceSimulator, LayoutOutcome, LayoutSpec};
use crate::query::PatternGraphQuery;
use crate::tracer::{trace_with_timeout, TraceStats};
use crate::types::NodeId;

use super::state::{GraphState, MergeReport};

/// Result of [`GraphSession::trace`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TraceOutcome {
    /// Origin was traced before; the state is untouched.
    AlreadyTraced { origin: NodeId },
    /// Origin does not exist in the store; the state is untouched.
    NotFound { pattern_name: String },
    /// Trace merged into the state.
    Merged { report: MergeReport, stats: TraceStats },
}

/// Gateway handle, configuration and one [`GraphState`].
///
/// Every mutating call takes `&mut self`, so a trace is fully merged before
/// the next one can start.
pub struct GraphSession<G: PatternGateway + ?Sized> {
    gateway: Arc<G>,
    config: GraphConfig,
    state: GraphState,
    selection: Option<Highlight>,
}

impl<G: PatternGateway + ?Sized> GraphSession<G> {
    pub fn new(gateway: Arc<G>, config: GraphConfig) -> Self {
        Self {
            gateway,
            config,
            state: GraphState::new(),
            selection: None,
        }
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Trace `query` and merge the result.
    ///
    /// Already traced origins short-circuit. With a KB hint this happens
    /// before the gateway is touched, otherwise once the origin is resolved.
    ///
    /// # Returns
    /// * `Err(GraphError::InvalidDepth)` - depth outside 1..=limit
    /// * `Err(GraphError::TraceTimeout)` / `Err(GraphError::StoreUnavailable)` - state untouched
    #[instrument(skip(self), fields(session = %self.state.session_id, pattern = %query.origin_name()))]
    pub async fn trace(&mut self, query: &PatternGraphQuery) -> GraphResult<TraceOutcome> {
        let params = query.to_params(&self.config)?;

        // Without a KB hint the name alone does not identify the origin; the
        // gateway decides which KB it resolves to.
        if let Some(kb) = params.kb_id.as_ref() {
            if let Some(origin) = self.state.traced_origin(params.origin_name(), Some(kb)) {
                info!(origin = %origin, "origin already traced, skipping");
                return Ok(TraceOutcome::AlreadyTraced {
                    origin: origin.clone(),
                });
            }
        }

        let result = trace_with_timeout(self.gateway.as_ref(), &params, self.config.trace_timeout()).await?;
        if result.not_found {
            return Ok(TraceOutcome::NotFound {
                pattern_name: result.origin_pattern,
            });
        }

        // Auto-detected origins are only known after the fetch.
        if let Some(origin) = result.origin.as_ref().filter(|o| self.state.is_traced(o)) {
            return Ok(TraceOutcome::AlreadyTraced {
                origin: origin.clone(),
            });
        }

        let stats = result.stats();
        let report = self.state.merge(&result);
        self.refresh_selection();
        Ok(TraceOutcome::Merged { report, stats })
    }

    /// Lay out the whole accumulated graph and pin the positions.
    pub fn layout(
        &mut self,
        spec: &LayoutSpec,
        simulator: Option<&dyn ForceSimulator>,
    ) -> GraphResult<LayoutOutcome> {
        let outcome = compute_layout(&self.state.node_list(), &self.state.edge_list(), spec, simulator)?;
        self.state.set_layout(outcome.clone());
        Ok(outcome)
    }

    /// Lay out with the configured default discipline.
    pub fn layout_default(&mut self, simulator: Option<&dyn ForceSimulator>) -> GraphResult<LayoutOutcome> {
        let spec = LayoutSpec::from_config(&self.config.layout);
        self.layout(&spec, simulator)
    }

    /// Highlight the component of `node`. `None` if the node is not in the graph.
    pub fn select(&mut self, node: &NodeId) -> Option<&Highlight> {
        if self.state.node(node).is_none() {
            self.selection = None;
            return None;
        }
        self.selection = Some(highlight_component(node, &self.state.edge_list()));
        self.selection.as_ref()
    }

    pub fn selection(&self) -> Option<&Highlight> {
        self.selection.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Forget every trace, position and selection.
    pub fn reset(&mut self) {
        self.state.reset();
        self.selection = None;
    }

    fn refresh_selection(&mut self) {
        if let Some(selected) = self.selection.as_ref().and_then(|h| h.selected.clone()) {
            self.selection = Some(highlight_component(&selected, &self.state.edge_list()));
        }
    }
}
