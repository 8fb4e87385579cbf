//! Connected-component highlighting for a selected node.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{EdgeKey, NodeId, PatternEdge};

/// Nodes and edges to emphasize for one selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub selected: Option<NodeId>,
    pub nodes: BTreeSet<NodeId>,
    pub edges: BTreeSet<EdgeKey>,
}

impl Highlight {
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, key: &EdgeKey) -> bool {
        self.edges.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Everything reachable from `selected`, every edge walked both ways.
///
/// The selected node is always highlighted, even when no edge touches it.
/// O(V + E).
pub fn highlight_component(selected: &NodeId, edges: &[PatternEdge]) -> Highlight {
    let mut adjacency: HashMap<&NodeId, Vec<(&NodeId, usize)>> = HashMap::new();
    for (idx, edge) in edges.iter().enumerate() {
        adjacency.entry(&edge.source).or_default().push((&edge.target, idx));
        adjacency.entry(&edge.target).or_default().push((&edge.source, idx));
    }

    let mut visited: HashSet<&NodeId> = HashSet::from([selected]);
    let mut touched: BTreeSet<usize> = BTreeSet::new();
    let mut queue = VecDeque::from([selected]);

    while let Some(current) = queue.pop_front() {
        let Some(neighbours) = adjacency.get(current) else {
            continue;
        };
        for &(next, idx) in neighbours {
            touched.insert(idx);
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    let highlight = Highlight {
        selected: Some(selected.clone()),
        nodes: visited.into_iter().cloned().collect(),
        edges: touched.into_iter().map(|idx| edges[idx].key()).collect(),
    };
    debug!(
        selected = %selected,
        nodes = highlight.nodes.len(),
        edges = highlight.edges.len(),
        "highlight computed"
    );
    highlight
}
