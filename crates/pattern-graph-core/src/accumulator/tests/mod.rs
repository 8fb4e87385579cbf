//! Accumulator tests.


use serde_json::{json, Value};

use crate::gateway::{InMemoryGateway, PatternRecord, ReverseLookup};
use crate::tracer::TraceResult;
use crate::types::{KbId, NodeSizing, PatternEdge, PatternNode, Relationship};

pub(super) fn node(name: &str, kb: &str) -> PatternNode {
    let kb = KbId::from(kb);
    let level = kb.level();
    PatternNode::new(name, kb, level, 1, &NodeSizing::default())
}

pub(super) fn composed_of(source: &PatternNode, target: &PatternNode) -> PatternEdge {
    PatternEdge::new(source.id.clone(), target.id.clone(), Relationship::ComposedOf).unwrap()
}

/// Origin P with descendants D1 and D2, as a depth-1 trace would return it.
pub(super) fn p_d1_d2() -> TraceResult {
    let p = node("P", "node1_kato");
    let d1 = node("D1", "node0_kato");
    let d2 = node("D2", "node0_kato");
    TraceResult {
        origin_pattern: "P".to_string(),
        origin: Some(p.id.clone()),
        not_found: false,
        edges: vec![composed_of(&p, &d1), composed_of(&p, &d2)],
        nodes: vec![p, d1, d2],
        depth_reached: 1,
        unresolved: Vec::new(),
    }
}

pub(super) fn record(name: &str, kb: &str, payload: Value) -> PatternRecord {
    let kb_id = KbId::from(kb);
    PatternRecord {
        pattern_name: name.to_string(),
        level: kb_id.level(),
        kb_id,
        frequency: 5,
        payload,
        metadata: Value::Null,
    }
}

/// p1 -> {s1, s2}, s1 -> {a, b}, s2 -> {a, c}.
pub(super) fn store() -> InMemoryGateway {
    InMemoryGateway::from_records(
        vec![
            record("a", "node0_kato", json!([["Ġthe"]])),
            record("b", "node0_kato", json!([["Ġcat"]])),
            record("c", "node0_kato", json!([["Ġmat"]])),
            record("s1", "node1_kato", json!([["PTRN|a"], ["PTRN|b"]])),
            record("s2", "node1_kato", json!([["PTRN|a"], ["PTRN|c"]])),
            record("p1", "node2_kato", json!([["PTRN|s1"], ["PTRN|s2"]])),
        ],
        ReverseLookup::Indexed,
    )
}
