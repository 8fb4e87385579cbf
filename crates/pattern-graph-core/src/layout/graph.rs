//! Index-based view of a node/edge set shared by the layout disciplines.
//!
//! Nodes are addressed by their position in an arena sorted by id, never by
//! reference, so cyclic inputs are harmless.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{NodeId, PatternEdge, PatternNode};

pub(crate) struct LayoutGraph<'a> {
    /// Nodes sorted by id.
    pub nodes: Vec<&'a PatternNode>,
    /// Directed edges as (source, target) arena indices, self-loops removed.
    pub edges: Vec<(usize, usize)>,
    /// Undirected adjacency, deduplicated and sorted.
    pub neighbours: Vec<Vec<usize>>,
}

impl<'a> LayoutGraph<'a> {
    pub fn build(nodes: &'a [PatternNode], edges: &[PatternEdge]) -> Self {
        let mut sorted: Vec<&PatternNode> = nodes.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));
        sorted.dedup_by(|a, b| a.id == b.id);

        let index: HashMap<&NodeId, usize> =
            sorted.iter().enumerate().map(|(i, n)| (&n.id, i)).collect();

        let mut directed = Vec::with_capacity(edges.len());
        let mut neighbours = vec![Vec::new(); sorted.len()];
        let mut dangling = 0usize;

        for edge in edges {
            match (index.get(&edge.source), index.get(&edge.target)) {
                (Some(&s), Some(&t)) if s != t => {
                    directed.push((s, t));
                    neighbours[s].push(t);
                    neighbours[t].push(s);
                }
                (Some(_), Some(_)) => {}
                _ => dangling += 1,
            }
        }
        if dangling > 0 {
            debug!(dangling, "ignoring edges with endpoints outside the node set");
        }

        for list in &mut neighbours {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            nodes: sorted,
            edges: directed,
            neighbours,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.binary_search_by(|n| n.id.cmp(id)).ok()
    }

    pub fn size(&self, idx: usize) -> f64 {
        let size = self.nodes[idx].visual_size;
        if size.is_finite() && size > 0.0 {
            size
        } else {
            0.0
        }
    }
}
