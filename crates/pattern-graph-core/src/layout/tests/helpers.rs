//! Node and edge builders for layout tests.

use crate::layout::LayoutOutcome;
use crate::types::{KbId, NodeId, NodeSizing, PatternEdge, PatternNode, Position, Relationship};

pub fn node(name: &str, level: u32) -> PatternNode {
    node_with_frequency(name, level, 1)
}

pub fn node_with_frequency(name: &str, level: u32, frequency: u64) -> PatternNode {
    PatternNode::new(
        name,
        KbId::new(format!("node{level}_kato")),
        level,
        frequency,
        &NodeSizing::default(),
    )
}

pub fn edge(source: &PatternNode, target: &PatternNode) -> PatternEdge {
    PatternEdge::new(source.id.clone(), target.id.clone(), Relationship::ComposedOf)
        .expect("test edges are never self-loops")
}

pub fn pos(outcome: &LayoutOutcome, node: &PatternNode) -> Position {
    outcome
        .position(&node.id)
        .unwrap_or_else(|| panic!("{} has no position", node.id))
}

pub fn distance(a: Position, b: Position) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Three-level hierarchy: p1 -> {s1, s2}, s1 -> {a, b}, s2 -> {a, c}.
pub fn hierarchy() -> (Vec<PatternNode>, Vec<PatternEdge>) {
    let a = node("a", 0);
    let b = node("b", 0);
    let c = node("c", 0);
    let s1 = node("s1", 1);
    let s2 = node("s2", 1);
    let p1 = node("p1", 2);
    let edges = vec![
        edge(&s1, &a),
        edge(&s1, &b),
        edge(&s2, &a),
        edge(&s2, &c),
        edge(&p1, &s1),
        edge(&p1, &s2),
    ];
    (vec![a, b, c, s1, s2, p1], edges)
}

pub fn missing(id: &str) -> NodeId {
    NodeId::from(id)
}
