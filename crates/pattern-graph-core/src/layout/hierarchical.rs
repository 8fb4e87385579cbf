//! Layered layout.
//!
//! 1. Rank = position of the node's level among the distinct levels present.
//! 2. Edges spanning more than one rank are split through virtual nodes so
//!    every layered edge joins adjacent ranks.
//! 3. Alternating barycenter sweeps reorder each rank; the ordering with the
//!    fewest crossings seen is kept.
//! 4. Real nodes get coordinates (virtual nodes take no space), the result is
//!    oriented and its centroid moved to the origin.

use std::collections::HashSet;

use tracing::debug;

use crate::types::{PatternEdge, PatternNode, Position};

use super::graph::LayoutGraph;
use super::{Discipline, LayoutOutcome, LayoutSpec};

/// Real and virtual nodes arranged in ranks.
///
/// Indices below `real` are arena indices of the [`LayoutGraph`]; the rest
/// are virtual.
struct Layers {
    rank: Vec<usize>,
    real: usize,
    /// Neighbours in rank + 1.
    up: Vec<Vec<usize>>,
    /// Neighbours in rank - 1.
    down: Vec<Vec<usize>>,
    order: Vec<Vec<usize>>,
}

impl Layers {
    fn build(graph: &LayoutGraph<'_>, node_rank: &[usize], rank_count: usize) -> Self {
        let real = graph.len();
        let mut rank = node_rank.to_vec();
        let mut up = vec![Vec::new(); real];
        let mut down = vec![Vec::new(); real];
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for &(s, t) in &graph.edges {
            let (lo, hi) = if rank[s] <= rank[t] { (s, t) } else { (t, s) };
            // Same-rank edges never cross anything we can reorder.
            if rank[lo] == rank[hi] || !seen.insert((lo, hi)) {
                continue;
            }
            let mut prev = lo;
            for r in rank[lo] + 1..rank[hi] {
                let virt = rank.len();
                rank.push(r);
                up.push(Vec::new());
                down.push(Vec::new());
                up[prev].push(virt);
                down[virt].push(prev);
                prev = virt;
            }
            up[prev].push(hi);
            down[hi].push(prev);
        }

        let mut order = vec![Vec::new(); rank_count];
        for (idx, &r) in rank.iter().enumerate() {
            order[r].push(idx);
        }

        Self {
            rank,
            real,
            up,
            down,
            order,
        }
    }

    fn virtual_count(&self) -> usize {
        self.rank.len() - self.real
    }

    fn positions(&self, order: &[Vec<usize>]) -> Vec<usize> {
        let mut pos = vec![0usize; self.rank.len()];
        for rank in order {
            for (i, &n) in rank.iter().enumerate() {
                pos[n] = i;
            }
        }
        pos
    }

    /// Total crossings between every pair of adjacent ranks.
    fn crossings(&self, order: &[Vec<usize>]) -> usize {
        let pos = self.positions(order);
        let pos = &pos;
        order
            .windows(2)
            .map(|pair| {
                let mut segments: Vec<(usize, usize)> = pair[0]
                    .iter()
                    .flat_map(|&u| self.up[u].iter().map(move |&v| (pos[u], pos[v])))
                    .collect();
                segments.sort_unstable();
                let mut targets: Vec<usize> = segments.into_iter().map(|(_, b)| b).collect();
                count_inversions(&mut targets)
            })
            .sum()
    }

    /// One barycenter pass, downward (ranks 1..) or upward (ranks ..top).
    ///
    /// A node without neighbours on the fixed side keeps its current slot.
    fn sweep(&self, order: &mut [Vec<usize>], downward: bool) {
        let mut pos = self.positions(order);
        let ranks: Vec<usize> = if downward {
            (1..order.len()).collect()
        } else {
            (0..order.len().saturating_sub(1)).rev().collect()
        };
        let fixed = if downward { &self.down } else { &self.up };

        for r in ranks {
            let mut keyed: Vec<(f64, usize)> = order[r]
                .iter()
                .map(|&n| {
                    let adj = &fixed[n];
                    let bary = if adj.is_empty() {
                        pos[n] as f64
                    } else {
                        adj.iter().map(|&m| pos[m] as f64).sum::<f64>() / adj.len() as f64
                    };
                    (bary, n)
                })
                .collect();
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
            order[r] = keyed.into_iter().map(|(_, n)| n).collect();
            for (i, &n) in order[r].iter().enumerate() {
                pos[n] = i;
            }
        }
    }

    /// Run up to `iterations` sweeps and keep the best ordering.
    fn minimize_crossings(&mut self, iterations: usize) -> usize {
        let mut best = self.order.clone();
        let mut best_crossings = self.crossings(&best);
        let mut current = self.order.clone();

        for iter in 0..iterations {
            if best_crossings == 0 {
                break;
            }
            self.sweep(&mut current, iter % 2 == 0);
            let crossings = self.crossings(&current);
            if crossings < best_crossings {
                best_crossings = crossings;
                best = current.clone();
            }
        }

        self.order = best;
        best_crossings
    }
}

/// Number of pairs `i < j` with `values[i] > values[j]`. Sorts `values`.
fn count_inversions(values: &mut [usize]) -> usize {
    let len = values.len();
    if len < 2 {
        return 0;
    }
    let mid = len / 2;
    let mut count = count_inversions(&mut values[..mid]) + count_inversions(&mut values[mid..]);

    let mut merged = Vec::with_capacity(len);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < len {
        if values[j] < values[i] {
            count += mid - i;
            merged.push(values[j]);
            j += 1;
        } else {
            merged.push(values[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&values[i..mid]);
    merged.extend_from_slice(&values[j..len]);
    values.copy_from_slice(&merged);
    count
}

/// Map (in-rank, rank-axis) coordinates onto the plane.
fn orient(discipline: Discipline, along: f64, rank: f64) -> Position {
    match discipline {
        Discipline::HierarchicalTopDown => Position::new(along, rank),
        Discipline::HierarchicalLeftRight => Position::new(rank, along),
        Discipline::HierarchicalRightLeft => Position::new(-rank, along),
        // Bottom-up; also the seed shape for force layout.
        _ => Position::new(along, -rank),
    }
}

fn recenter(points: &mut [Position]) {
    if points.is_empty() {
        return;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;
    for p in points.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
    }
}

pub(super) fn layout(nodes: &[PatternNode], edges: &[PatternEdge], spec: &LayoutSpec) -> LayoutOutcome {
    let graph = LayoutGraph::build(nodes, edges);
    if graph.is_empty() {
        return LayoutOutcome::default();
    }

    let mut levels: Vec<u32> = graph.nodes.iter().map(|n| n.level).collect();
    levels.sort_unstable();
    levels.dedup();
    let rank_count = levels.len();
    let node_rank: Vec<usize> = graph
        .nodes
        .iter()
        .map(|n| levels.partition_point(|&l| l < n.level))
        .collect();

    let mut layers = Layers::build(&graph, &node_rank, rank_count);
    let crossings = layers.minimize_crossings(spec.crossing_iterations);
    debug!(
        ranks = rank_count,
        virtual_nodes = layers.virtual_count(),
        crossings,
        "crossing reduction complete"
    );

    let mut max_size = vec![0.0f64; rank_count];
    for (idx, &r) in node_rank.iter().enumerate() {
        max_size[r] = max_size[r].max(graph.size(idx));
    }
    let mut rank_pos = vec![0.0f64; rank_count];
    for r in 1..rank_count {
        rank_pos[r] = rank_pos[r - 1] + spec.rank_spacing + max_size[r - 1].max(max_size[r]);
    }

    let mut along = vec![0.0f64; graph.len()];
    for rank in &layers.order {
        let mut previous: Option<(f64, f64)> = None;
        let mut placed = Vec::new();
        for &n in rank.iter().filter(|&&n| n < layers.real) {
            let size = graph.size(n);
            let coord = match previous {
                None => 0.0,
                Some((at, prev_size)) => at + spec.node_spacing + prev_size / 2.0 + size / 2.0,
            };
            along[n] = coord;
            previous = Some((coord, size));
            placed.push(n);
        }
        // Center each rank on the rank axis.
        if let Some((last, _)) = previous {
            let mid = last / 2.0;
            for n in placed {
                along[n] -= mid;
            }
        }
    }

    let mut points: Vec<Position> = (0..graph.len())
        .map(|idx| orient(spec.discipline, along[idx], rank_pos[node_rank[idx]]))
        .collect();
    recenter(&mut points);

    LayoutOutcome {
        positions: graph
            .nodes
            .iter()
            .zip(points)
            .map(|(node, point)| (node.id.clone(), point))
            .collect(),
        unpositioned: Vec::new(),
    }
}
