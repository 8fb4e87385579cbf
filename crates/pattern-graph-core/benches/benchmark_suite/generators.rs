//! Deterministic layered graph generators.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use pattern_graph_core::{
    KbId, NodeSizing, PatternEdge, PatternNode, Relationship, TraceResult,
};

fn pick(seed: u64, salt: usize, bound: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    (seed, salt).hash(&mut hasher);
    (hasher.finish() % bound.max(1) as u64) as usize
}

/// `levels` ranks of `width` nodes; every node above level 0 is composed of
/// `fan_out` pseudo-randomly chosen nodes one level down.
pub fn layered_graph(levels: u32, width: usize, fan_out: usize) -> (Vec<PatternNode>, Vec<PatternEdge>) {
    let sizing = NodeSizing::default();
    let mut nodes = Vec::with_capacity(levels as usize * width);
    for level in 0..levels {
        let kb = KbId::new(format!("node{level}_bench"));
        for i in 0..width {
            let frequency = pick(u64::from(level), i, 1000) as u64;
            nodes.push(PatternNode::new(format!("p{level}_{i:05}"), kb.clone(), level, frequency, &sizing));
        }
    }

    let mut edges = Vec::new();
    for level in 1..levels as usize {
        for i in 0..width {
            let parent = &nodes[level * width + i];
            for k in 0..fan_out {
                let child = &nodes[(level - 1) * width + pick(parent_seed(level, i), k, width)];
                if let Some(edge) = PatternEdge::new(parent.id.clone(), child.id.clone(), Relationship::ComposedOf) {
                    edges.push(edge);
                }
            }
        }
    }
    edges.sort_by_key(PatternEdge::key);
    edges.dedup_by_key(|e| e.key());
    (nodes, edges)
}

fn parent_seed(level: usize, i: usize) -> u64 {
    (level * 1_000_003 + i) as u64
}

/// The graph packaged as one trace result.
pub fn trace_result(levels: u32, width: usize, fan_out: usize) -> TraceResult {
    let (nodes, edges) = layered_graph(levels, width, fan_out);
    TraceResult {
        origin_pattern: nodes[0].pattern_name.clone(),
        origin: Some(nodes[0].id.clone()),
        not_found: false,
        depth_reached: levels as usize,
        unresolved: Vec::new(),
        nodes,
        edges,
    }
}
