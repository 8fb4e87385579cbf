//! Core data model: node and KB identifiers, pattern nodes, compositional
//! edges, and 2D positions.

mod edge;
mod ids;
mod node;

pub use edge::{EdgeKey, PatternEdge, Relationship};
pub use ids::{KbId, NodeId, NODE_ID_SEPARATOR, UNKNOWN_LEVEL};
pub use node::{display_label, NodeSizing, PatternNode, REFERENCE_PREFIX};

use serde::{Deserialize, Serialize};

/// A point in layout space. Screen convention: y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
