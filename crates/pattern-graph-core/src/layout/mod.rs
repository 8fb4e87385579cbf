//! Layout engine.
//!
//! Computes a fixed 2D position for every node of an accumulated graph.
//! The discipline is a tagged variant dispatched to one of several layout
//! functions that share the same `(nodes, edges, spec) -> LayoutOutcome`
//! contract:
//!
//! - **Hierarchical** (four orientations): rank by level, barycenter
//!   crossing minimization, size-aware spacing, centroid at the origin.
//! - **Radial** (outward/inward): BFS rings around a center node.
//! - **Force**: delegated to an external [`ForceSimulator`].
//!
//! Layout never fails because of awkward input. A node that cannot be
//! placed is put at the origin and listed in
//! [`LayoutOutcome::unpositioned`].

mod force;
mod graph;
mod hierarchical;
mod radial;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::LayoutConfig;
use crate::error::{GraphError, GraphResult};
use crate::types::{NodeId, PatternEdge, PatternNode, Position};

pub use force::{ForceInput, ForceLink, ForceNode, ForceSimulator};

/// Layout discipline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discipline {
    /// Lowest level at the bottom.
    #[default]
    HierarchicalBottomUp,
    /// Lowest level at the top.
    HierarchicalTopDown,
    /// Lowest level on the left.
    HierarchicalLeftRight,
    /// Lowest level on the right.
    HierarchicalRightLeft,
    /// Center node in the middle, farther rings outside.
    RadialOut,
    /// Center node on the outside, farther rings inside.
    RadialIn,
    /// External physics simulation.
    Force,
}

impl Discipline {
    pub const ALL: [Discipline; 7] = [
        Self::HierarchicalBottomUp,
        Self::HierarchicalTopDown,
        Self::HierarchicalLeftRight,
        Self::HierarchicalRightLeft,
        Self::RadialOut,
        Self::RadialIn,
        Self::Force,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HierarchicalBottomUp => "hierarchical-bottom-up",
            Self::HierarchicalTopDown => "hierarchical-top-down",
            Self::HierarchicalLeftRight => "hierarchical-left-right",
            Self::HierarchicalRightLeft => "hierarchical-right-left",
            Self::RadialOut => "radial-out",
            Self::RadialIn => "radial-in",
            Self::Force => "force",
        }
    }

    pub fn is_hierarchical(&self) -> bool {
        matches!(
            self,
            Self::HierarchicalBottomUp
                | Self::HierarchicalTopDown
                | Self::HierarchicalLeftRight
                | Self::HierarchicalRightLeft
        )
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| GraphError::invalid_input(format!("unknown layout discipline: {s}")))
    }
}

/// How a radial ring's full circle is split between its nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AngularMode {
    /// Equal angle per node.
    Even,
    /// Wedges proportional to BFS-subtree size.
    #[default]
    SubtreeWeight,
}

/// Discipline plus spacing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSpec {
    pub discipline: Discipline,
    pub node_spacing: f64,
    pub rank_spacing: f64,
    pub ring_spacing: f64,
    pub crossing_iterations: usize,
    pub angular_mode: AngularMode,
    /// Radial center; defaults to the most connected node.
    pub center: Option<NodeId>,
    /// Repulsion handed to the force simulator (negative = repel).
    pub charge: f64,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl LayoutSpec {
    pub fn new(discipline: Discipline) -> Self {
        Self::default().discipline(discipline)
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            discipline: config.default_discipline,
            node_spacing: config.node_spacing,
            rank_spacing: config.rank_spacing,
            ring_spacing: config.ring_spacing,
            crossing_iterations: config.crossing_iterations,
            angular_mode: config.angular_mode,
            center: None,
            charge: -300.0,
        }
    }

    /// Builder: set discipline.
    #[must_use]
    pub fn discipline(mut self, discipline: Discipline) -> Self {
        self.discipline = discipline;
        self
    }

    /// Builder: set radial center.
    #[must_use]
    pub fn center(mut self, center: NodeId) -> Self {
        self.center = Some(center);
        self
    }

    /// Builder: set radial angular mode.
    #[must_use]
    pub fn angular_mode(mut self, mode: AngularMode) -> Self {
        self.angular_mode = mode;
        self
    }

    /// Builder: set in-rank node spacing.
    #[must_use]
    pub fn node_spacing(mut self, spacing: f64) -> Self {
        self.node_spacing = spacing;
        self
    }

    /// Builder: set rank spacing.
    #[must_use]
    pub fn rank_spacing(mut self, spacing: f64) -> Self {
        self.rank_spacing = spacing;
        self
    }

    pub fn validate(&self) -> GraphResult<()> {
        for (name, value) in [
            ("node_spacing", self.node_spacing),
            ("rank_spacing", self.rank_spacing),
            ("ring_spacing", self.ring_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GraphError::invalid_input(format!(
                    "{name} must be a finite value > 0, got {value}"
                )));
            }
        }
        if !self.charge.is_finite() {
            return Err(GraphError::invalid_input("charge must be finite"));
        }
        Ok(())
    }
}

/// Positions for every input node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutOutcome {
    pub positions: BTreeMap<NodeId, Position>,
    /// Nodes that were defaulted to the origin.
    pub unpositioned: Vec<NodeId>,
}

impl LayoutOutcome {
    pub fn position(&self, id: &NodeId) -> Option<Position> {
        self.positions.get(id).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.unpositioned.is_empty()
    }

    /// User-facing note about defaulted nodes, if any.
    pub fn diagnostic(&self) -> Option<String> {
        match self.unpositioned.len() {
            0 => None,
            1 => Some("1 node could not be positioned automatically".to_string()),
            n => Some(format!("{n} nodes could not be positioned automatically")),
        }
    }

    /// Pair every node with its position.
    pub fn annotate(&self, nodes: &[PatternNode]) -> Vec<PositionedNode> {
        nodes
            .iter()
            .map(|node| PositionedNode {
                position: self.position(&node.id).unwrap_or(Position::ORIGIN),
                fixed: true,
                node: node.clone(),
            })
            .collect()
    }

    /// Fill in every node in `nodes` that has no finite position yet.
    fn complete(mut self, nodes: &[PatternNode]) -> Self {
        for node in nodes {
            let ok = self.positions.get(&node.id).is_some_and(Position::is_finite);
            if !ok {
                warn!(node = %node.id, "node could not be positioned, defaulting to origin");
                self.positions.insert(node.id.clone(), Position::ORIGIN);
                if !self.unpositioned.contains(&node.id) {
                    self.unpositioned.push(node.id.clone());
                }
            }
        }
        self.unpositioned.sort();
        self
    }
}

/// A node with its fixed layout coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: PatternNode,
    pub position: Position,
    /// Positions are pinned once computed.
    pub fixed: bool,
}

/// Lay out `nodes` under `spec`.
///
/// `simulator` is only consulted for [`Discipline::Force`].
///
/// # Returns
/// * `Ok(LayoutOutcome)` - one position per node, possibly with defaults
/// * `Err(GraphError::InvalidInput)` - non-positive or non-finite spacing
/// * `Err(GraphError::SimulatorUnavailable)` - force layout without simulator
pub fn compute_layout(
    nodes: &[PatternNode],
    edges: &[PatternEdge],
    spec: &LayoutSpec,
    simulator: Option<&dyn ForceSimulator>,
) -> GraphResult<LayoutOutcome> {
    spec.validate()?;

    let raw = match spec.discipline {
        Discipline::HierarchicalBottomUp
        | Discipline::HierarchicalTopDown
        | Discipline::HierarchicalLeftRight
        | Discipline::HierarchicalRightLeft => hierarchical::layout(nodes, edges, spec),
        Discipline::RadialOut | Discipline::RadialIn => radial::layout(nodes, edges, spec),
        Discipline::Force => force::layout(nodes, edges, spec, simulator)?,
    };

    let outcome = raw.complete(nodes);
    info!(
        discipline = %spec.discipline,
        nodes = outcome.positions.len(),
        unpositioned = outcome.unpositioned.len(),
        "layout computed"
    );
    Ok(outcome)
}
