//! Trace parameter and result types.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::types::{KbId, NodeId, NodeSizing, PatternEdge, PatternNode, REFERENCE_PREFIX};

/// Largest accepted trace depth.
pub const MAX_TRACE_DEPTH: usize = 5;

/// Depth used when none is requested.
pub const DEFAULT_TRACE_DEPTH: usize = 3;

/// Parameters for one trace.
#[derive(Debug, Clone)]
pub struct TraceParams {
    /// Origin pattern name; a leading `PTRN|` is tolerated and stripped.
    pub pattern_name: String,

    /// KB the origin lives in. `None` = search all KBs, lowest level first.
    pub kb_id: Option<KbId>,

    /// Expansion rounds (default: 3, max: 5). Depth 0 returns the origin only.
    pub max_depth: usize,

    /// Frequency -> visual size mapping applied to discovered nodes.
    pub sizing: NodeSizing,
}

impl TraceParams {
    pub fn new(pattern_name: impl Into<String>) -> Self {
        Self {
            pattern_name: pattern_name.into(),
            kb_id: None,
            max_depth: DEFAULT_TRACE_DEPTH,
            sizing: NodeSizing::default(),
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
        self.max_depth = depth;
        self
    }

    /// Builder: set node sizing.
    #[must_use]
    pub fn sizing(mut self, sizing: NodeSizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Origin name without the reference prefix.
    pub fn origin_name(&self) -> &str {
        self.pattern_name
            .strip_prefix(REFERENCE_PREFIX)
            .unwrap_or(&self.pattern_name)
    }

    pub fn validate(&self) -> GraphResult<()> {
        if self.max_depth > MAX_TRACE_DEPTH {
            return Err(GraphError::InvalidDepth {
                requested: self.max_depth,
                max: MAX_TRACE_DEPTH,
            });
        }
        if self.origin_name().trim().is_empty() {
            return Err(GraphError::invalid_input("pattern name must not be empty"));
        }
        if let Some(kb) = &self.kb_id {
            kb.validate()?;
        }
        Ok(())
    }
}

/// Summary numbers for a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub depth_reached: usize,
    pub origin_pattern: String,
    pub origin_kb: Option<KbId>,
}

/// Output of one trace. Ephemeral: merge it into a
/// [`GraphState`](crate::accumulator::GraphState) to keep it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceResult {
    /// Requested origin name (prefix stripped).
    pub origin_pattern: String,

    /// Resolved origin node id; `None` when the origin was not found.
    pub origin: Option<NodeId>,

    /// Set when the origin pattern does not exist in the store.
    pub not_found: bool,

    /// Discovered nodes in BFS order, origin first.
    pub nodes: Vec<PatternNode>,

    /// Discovered edges, duplicates collapsed by summing counts.
    pub edges: Vec<PatternEdge>,

    /// Largest BFS distance of any returned node.
    pub depth_reached: usize,

    /// Referenced pattern names that no KB could resolve.
    pub unresolved: Vec<String>,
}

impl TraceResult {
    /// Empty result flagged as not found.
    pub fn not_found(origin_pattern: impl Into<String>) -> Self {
        Self {
            origin_pattern: origin_pattern.into(),
            origin: None,
            not_found: true,
            nodes: Vec::new(),
            edges: Vec::new(),
            depth_reached: 0,
            unresolved: Vec::new(),
        }
    }

    /// The origin node, if found.
    pub fn origin_node(&self) -> Option<&PatternNode> {
        let origin = self.origin.as_ref()?;
        self.nodes.iter().find(|n| &n.id == origin)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn stats(&self) -> TraceStats {
        TraceStats {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            depth_reached: self.depth_reached,
            origin_pattern: self.origin_pattern.clone(),
            origin_kb: self.origin_node().map(|n| n.kb_id.clone()),
        }
    }
}
