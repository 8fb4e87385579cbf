//! Assertion helpers.

use std::collections::BTreeSet;

use pattern_graph_core::{EdgeKey, NodeId, PatternEdge, PatternGraphResponse};

pub fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

pub fn node_ids(response: &PatternGraphResponse) -> BTreeSet<NodeId> {
    response.nodes.iter().map(|n| n.id.clone()).collect()
}

/// Edge keys with their reference counts.
pub fn edge_counts(edges: &[PatternEdge]) -> Vec<(EdgeKey, u32)> {
    let mut counts: Vec<(EdgeKey, u32)> = edges.iter().map(|e| (e.key(), e.reference_count)).collect();
    counts.sort();
    counts
}

pub fn count_of(edges: &[PatternEdge], source: &str, target: &str) -> Option<u32> {
    let key = EdgeKey::new(id(source), id(target));
    edges.iter().find(|e| e.key() == key).map(|e| e.reference_count)
}
