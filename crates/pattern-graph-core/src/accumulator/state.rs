//! Accumulated graph state and the additive merge.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::layout::LayoutOutcome;
use crate::tracer::TraceResult;
use crate::types::{EdgeKey, KbId, NodeId, PatternEdge, PatternNode, Position};

/// What one merge changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub nodes_added: usize,
    pub edges_added: usize,
    /// Existing edges whose reference count went up.
    pub edges_reinforced: usize,
    /// The trace origin, `None` for a not-found result.
    pub origin: Option<NodeId>,
}

impl MergeReport {
    /// Whether node or edge presence changed.
    pub fn grew(&self) -> bool {
        self.nodes_added > 0 || self.edges_added > 0
    }
}

/// Session-scoped, append-only graph.
///
/// Nodes are keyed by id and never replaced: the first-seen version wins.
/// Edges are keyed by `(source, target)`; rediscovery adds to the existing
/// reference count.
#[derive(Debug, Clone)]
pub struct GraphState {
    /// Session identifier (UUID v4 string).
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    nodes: BTreeMap<NodeId, PatternNode>,
    edges: BTreeMap<EdgeKey, PatternEdge>,
    traced: BTreeSet<NodeId>,
    layout: Option<LayoutOutcome>,
}

impl Default for GraphState {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            traced: BTreeSet::new(),
            layout: None,
        }
    }

    /// Merge one trace into the state.
    pub fn merge(&mut self, result: &TraceResult) -> MergeReport {
        let mut report = MergeReport {
            origin: result.origin.clone(),
            ..MergeReport::default()
        };
        if result.not_found {
            return report;
        }

        for node in &result.nodes {
            if !self.nodes.contains_key(&node.id) {
                self.nodes.insert(node.id.clone(), node.clone());
                report.nodes_added += 1;
            }
        }

        for edge in &result.edges {
            match self.edges.get_mut(&edge.key()) {
                Some(existing) => {
                    existing.absorb(edge);
                    report.edges_reinforced += 1;
                }
                None => {
                    self.edges.insert(edge.key(), edge.clone());
                    report.edges_added += 1;
                }
            }
        }

        if let Some(origin) = &result.origin {
            self.traced.insert(origin.clone());
        }
        self.updated_at = Utc::now();

        info!(
            session = %self.session_id,
            nodes_added = report.nodes_added,
            edges_added = report.edges_added,
            edges_reinforced = report.edges_reinforced,
            total_nodes = self.nodes.len(),
            total_edges = self.edges.len(),
            "trace merged"
        );
        report
    }

    /// Traced origin matching `pattern_name` (and `kb_id`, when given).
    pub fn traced_origin(&self, pattern_name: &str, kb_id: Option<&KbId>) -> Option<&NodeId> {
        match kb_id {
            Some(kb) => self.traced.get(&NodeId::new(kb, pattern_name)),
            None => self.traced.iter().find(|id| id.pattern_name() == pattern_name),
        }
    }

    pub fn is_traced(&self, origin: &NodeId) -> bool {
        self.traced.contains(origin)
    }

    pub fn traced(&self) -> impl Iterator<Item = &NodeId> {
        self.traced.iter()
    }

    pub fn node(&self, id: &NodeId) -> Option<&PatternNode> {
        self.nodes.get(id)
    }

    pub fn edge(&self, key: &EdgeKey) -> Option<&PatternEdge> {
        self.edges.get(key)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PatternNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &PatternEdge> {
        self.edges.values()
    }

    /// Owned node array, ordered by id.
    pub fn node_list(&self) -> Vec<PatternNode> {
        self.nodes.values().cloned().collect()
    }

    /// Owned edge array, ordered by key.
    pub fn edge_list(&self) -> Vec<PatternEdge> {
        self.edges.values().cloned().collect()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pin a computed layout. Nodes merged afterwards have no position until
    /// the next layout.
    pub fn set_layout(&mut self, outcome: LayoutOutcome) {
        debug!(positions = outcome.positions.len(), "layout pinned");
        self.layout = Some(outcome);
    }

    pub fn layout(&self) -> Option<&LayoutOutcome> {
        self.layout.as_ref()
    }

    pub fn position(&self, id: &NodeId) -> Option<Position> {
        self.layout.as_ref()?.position(id)
    }

    /// Drop everything accumulated so far. The session id is kept.
    pub fn reset(&mut self) {
        info!(session = %self.session_id, nodes = self.nodes.len(), "graph state reset");
        self.nodes.clear();
        self.edges.clear();
        self.traced.clear();
        self.layout = None;
        self.updated_at = Utc::now();
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            session_id: self.session_id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            nodes: self.node_list(),
            edges: self.edge_list(),
            traced: self.traced.iter().cloned().collect(),
            positions: self
                .layout
                .as_ref()
                .map(|l| l.positions.clone())
                .unwrap_or_default(),
        }
    }
}

/// Functional form of [`GraphState::merge`].
pub fn merge(mut state: GraphState, result: &TraceResult) -> GraphState {
    state.merge(result);
    state
}

/// Serializable view of a [`GraphState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub nodes: Vec<PatternNode>,
    pub edges: Vec<PatternEdge>,
    pub traced: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub positions: BTreeMap<NodeId, Position>,
    pub total_nodes: usize,
    pub total_edges: usize,
}
