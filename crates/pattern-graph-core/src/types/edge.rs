//! Directed compositional edges between pattern nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::NodeId;

/// How an edge was discovered.
///
/// Both kinds point from the referencing pattern to the referenced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    /// Found by reverse lookup: the source pattern contains the target.
    Contains,
    /// Found in the source's own payload: the source is composed of the target.
    ComposedOf,
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains => f.write_str("contains"),
            Self::ComposedOf => f.write_str("composed_of"),
        }
    }
}

/// Identity of an edge. There is at most one edge per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: NodeId,
    pub target: NodeId,
}

impl EdgeKey {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint.
    pub fn other(&self, node: &NodeId) -> Option<&NodeId> {
        if &self.source == node {
            Some(&self.target)
        } else if &self.target == node {
            Some(&self.source)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// A directed edge with a discovery count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub relationship: Relationship,
    /// Number of times this edge has been discovered, always >= 1.
    pub reference_count: u32,
}

impl PatternEdge {
    /// Build an edge with a count of one. Returns `None` for self-loops.
    pub fn new(source: NodeId, target: NodeId, relationship: Relationship) -> Option<Self> {
        if source == target {
            return None;
        }
        Some(Self {
            source,
            target,
            relationship,
            reference_count: 1,
        })
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source.clone(), self.target.clone())
    }

    /// Add another edge's discoveries to this one.
    pub fn absorb(&mut self, other: &PatternEdge) {
        self.reference_count = self.reference_count.saturating_add(other.reference_count);
    }
}
