//! Radial layout: BFS rings around a center node.

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::f64::consts::TAU;

use tracing::{debug, warn};

use crate::types::{NodeId, PatternEdge, PatternNode, Position};

use super::graph::LayoutGraph;
use super::{AngularMode, Discipline, LayoutOutcome, LayoutSpec};

/// Requested center if present, else highest degree (ties: smallest id).
fn pick_center(graph: &LayoutGraph<'_>, requested: Option<&NodeId>) -> usize {
    if let Some(id) = requested {
        match graph.index_of(id) {
            Some(idx) => return idx,
            None => warn!(center = %id, "requested radial center not in graph, using most connected node"),
        }
    }
    (0..graph.len())
        .max_by_key(|&i| (graph.neighbours[i].len(), Reverse(i)))
        .unwrap_or(0)
}

/// BFS spanning tree from `root`.
struct RingTree {
    ring: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    /// Reached nodes in BFS order.
    order: Vec<usize>,
}

impl RingTree {
    fn grow(graph: &LayoutGraph<'_>, root: usize) -> Self {
        let mut ring = vec![None; graph.len()];
        let mut children = vec![Vec::new(); graph.len()];
        let mut order = Vec::with_capacity(graph.len());
        let mut queue = VecDeque::from([root]);
        ring[root] = Some(0);

        while let Some(u) = queue.pop_front() {
            order.push(u);
            let next = ring[u].map_or(0, |r| r + 1);
            for &v in &graph.neighbours[u] {
                if ring[v].is_none() {
                    ring[v] = Some(next);
                    children[u].push(v);
                    queue.push_back(v);
                }
            }
        }

        Self {
            ring,
            children,
            order,
        }
    }

    fn max_ring(&self) -> usize {
        self.ring.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Node count of every BFS subtree, the node itself included.
    fn subtree_weights(&self) -> Vec<f64> {
        let mut weight = vec![1.0f64; self.ring.len()];
        for &u in self.order.iter().rev() {
            let below: f64 = self.children[u].iter().map(|&c| weight[c]).sum();
            weight[u] += below;
        }
        weight
    }

    fn angles(&self, mode: AngularMode) -> Vec<f64> {
        let mut angle = vec![0.0f64; self.ring.len()];
        match mode {
            AngularMode::Even => {
                let mut per_ring: Vec<Vec<usize>> = vec![Vec::new(); self.max_ring() + 1];
                for &u in &self.order {
                    if let Some(r) = self.ring[u] {
                        per_ring[r].push(u);
                    }
                }
                for members in per_ring {
                    let step = TAU / members.len().max(1) as f64;
                    for (i, u) in members.into_iter().enumerate() {
                        angle[u] = step * i as f64;
                    }
                }
            }
            AngularMode::SubtreeWeight => {
                let weight = self.subtree_weights();
                let mut wedge = vec![(0.0f64, TAU); self.ring.len()];
                for &u in &self.order {
                    let (mut start, end) = wedge[u];
                    let total: f64 = self.children[u].iter().map(|&c| weight[c]).sum();
                    if total <= 0.0 {
                        continue;
                    }
                    let span = end - start;
                    for &c in &self.children[u] {
                        let share = span * weight[c] / total;
                        wedge[c] = (start, start + share);
                        angle[c] = start + share / 2.0;
                        start += share;
                    }
                }
            }
        }
        angle
    }
}

/// Radius of every slot, innermost first.
///
/// Consecutive rings are at least `ring_spacing` apart, and further when
/// their largest nodes would leave less than half a ring spacing between
/// them. A ring is also wide enough that evenly spaced neighbours on it are
/// `node_spacing` apart edge to edge.
fn ring_radii(graph: &LayoutGraph<'_>, members: &[Vec<usize>], spec: &LayoutSpec) -> Vec<f64> {
    let max_size: Vec<f64> = members
        .iter()
        .map(|nodes| nodes.iter().map(|&u| graph.size(u)).fold(0.0, f64::max))
        .collect();

    let mut radii = vec![0.0f64; members.len()];
    for slot in 1..members.len() {
        let clearance = (max_size[slot - 1] + max_size[slot]) / 2.0 + spec.ring_spacing / 2.0;
        let mut radius = radii[slot - 1] + spec.ring_spacing.max(clearance);

        let count = members[slot].len();
        if count > 1 {
            // Chord between neighbours at angle TAU / count.
            let chord = 2.0 * (std::f64::consts::PI / count as f64).sin();
            radius = radius.max((max_size[slot] + spec.node_spacing) / chord);
        }
        radii[slot] = radius;
    }
    radii
}

pub(super) fn layout(nodes: &[PatternNode], edges: &[PatternEdge], spec: &LayoutSpec) -> LayoutOutcome {
    let graph = LayoutGraph::build(nodes, edges);
    if graph.is_empty() {
        return LayoutOutcome::default();
    }

    let center = pick_center(&graph, spec.center.as_ref());
    let tree = RingTree::grow(&graph, center);
    let max_ring = tree.max_ring();
    let angles = tree.angles(spec.angular_mode);
    let inward = spec.discipline == Discipline::RadialIn;

    let unreachable = graph.len() - tree.order.len();
    if unreachable > 0 {
        debug!(unreachable, center = %graph.nodes[center].id, "nodes not connected to radial center");
    }

    // Slot 0 is the origin; outward layouts put ring r in slot r, inward
    // layouts reverse the rings so the center sits outermost.
    let slot_of = |ring: usize| if inward { max_ring - ring + 1 } else { ring };
    let slot_count = if inward { max_ring + 2 } else { max_ring + 1 };
    let mut members = vec![Vec::new(); slot_count];
    for &u in &tree.order {
        members[slot_of(tree.ring[u].unwrap_or(0))].push(u);
    }
    let radii = if max_ring == 0 {
        vec![0.0; slot_count]
    } else {
        ring_radii(&graph, &members, spec)
    };

    let mut positions = std::collections::BTreeMap::new();
    for (slot, nodes) in members.iter().enumerate() {
        for &u in nodes {
            let radius = radii[slot];
            let point = Position::new(radius * angles[u].cos(), radius * angles[u].sin());
            positions.insert(graph.nodes[u].id.clone(), point);
        }
    }

    LayoutOutcome {
        positions,
        unpositioned: Vec::new(),
    }
}
