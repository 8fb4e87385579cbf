//! Force layout delegated to an external physics simulator.
//!
//! The engine only packages the graph for the simulator and reads back the
//! settled positions. Nodes are seeded with the bottom-up hierarchical
//! layout so a simulator that stops early still returns a readable shape.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::types::{NodeId, PatternEdge, PatternNode, Position};

use super::{hierarchical, Discipline, LayoutOutcome, LayoutSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceNode {
    pub id: NodeId,
    pub size: f64,
    /// Starting position.
    pub seed: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceLink {
    pub source: NodeId,
    pub target: NodeId,
    /// Attraction weight, the edge's reference count.
    pub strength: f64,
}

/// Everything a simulator needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceInput {
    pub nodes: Vec<ForceNode>,
    pub links: Vec<ForceLink>,
    /// Node-node charge; negative repels.
    pub charge: f64,
    /// Rest length of a link.
    pub link_distance: f64,
}

/// External physics engine (charge repulsion + link attraction).
pub trait ForceSimulator: Send + Sync {
    /// Run the simulation to rest and return settled positions.
    ///
    /// Missing or non-finite positions are tolerated; those nodes are
    /// defaulted to the origin by the caller.
    fn settle(&self, input: &ForceInput) -> GraphResult<Vec<(NodeId, Position)>>;
}

fn build_input(nodes: &[PatternNode], edges: &[PatternEdge], spec: &LayoutSpec) -> ForceInput {
    let seed_spec = spec.clone().discipline(Discipline::HierarchicalBottomUp);
    let seeds = hierarchical::layout(nodes, edges, &seed_spec);

    let mut seen: HashSet<&NodeId> = HashSet::new();
    let force_nodes: Vec<ForceNode> = nodes
        .iter()
        .filter(|n| seen.insert(&n.id))
        .map(|n| ForceNode {
            id: n.id.clone(),
            size: if n.visual_size.is_finite() { n.visual_size } else { 0.0 },
            seed: seeds.position(&n.id).unwrap_or(Position::ORIGIN),
        })
        .collect();

    let links: Vec<ForceLink> = edges
        .iter()
        .filter(|e| seen.contains(&e.source) && seen.contains(&e.target) && e.source != e.target)
        .map(|e| ForceLink {
            source: e.source.clone(),
            target: e.target.clone(),
            strength: f64::from(e.reference_count),
        })
        .collect();

    ForceInput {
        nodes: force_nodes,
        links,
        charge: spec.charge,
        link_distance: spec.rank_spacing,
    }
}

pub(super) fn layout(
    nodes: &[PatternNode],
    edges: &[PatternEdge],
    spec: &LayoutSpec,
    simulator: Option<&dyn ForceSimulator>,
) -> GraphResult<LayoutOutcome> {
    let simulator = simulator.ok_or(GraphError::SimulatorUnavailable)?;
    if nodes.is_empty() {
        return Ok(LayoutOutcome::default());
    }

    let input = build_input(nodes, edges, spec);
    let known: HashSet<&NodeId> = input.nodes.iter().map(|n| &n.id).collect();
    let settled = simulator.settle(&input)?;

    let mut positions = BTreeMap::new();
    let mut foreign = 0usize;
    for (id, point) in settled {
        if known.contains(&id) {
            positions.insert(id, point);
        } else {
            foreign += 1;
        }
    }
    if foreign > 0 {
        debug!(foreign, "simulator returned positions for unknown nodes, ignored");
    }

    Ok(LayoutOutcome {
        positions,
        unpositioned: Vec::new(),
    })
}
