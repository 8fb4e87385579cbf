//! Multi-trace sessions: trace, merge, layout, select, reset.

use std::sync::Arc;

use pattern_graph_core::{
    Discipline, GraphConfig, GraphSession, GraphSnapshot, InMemoryGateway, LayoutSpec,
    PatternGraphQuery, ReverseLookup, TraceOutcome,
};

use crate::common::fixtures::{temp_file, STORE};
use crate::common::helpers::id;

fn session_from_file() -> GraphSession<InMemoryGateway> {
    let file = temp_file(STORE, ".json");
    let gateway = InMemoryGateway::from_json_file(file.path(), ReverseLookup::Scan).unwrap();
    GraphSession::new(Arc::new(gateway), GraphConfig::default_config())
}

#[tokio::test]
async fn test_explore_layout_and_highlight() {
    let mut session = session_from_file();

    for name in ["phr_cat", "phr_mat"] {
        let outcome = session
            .trace(&PatternGraphQuery::new(name).max_depth(1))
            .await
            .unwrap();
        assert!(matches!(outcome, TraceOutcome::Merged { .. }), "{name}: {outcome:?}");
    }
    assert_eq!(session.state().node_count(), 6);
    assert_eq!(session.state().edge_count(), 6);

    let layout = session
        .layout(&LayoutSpec::new(Discipline::HierarchicalBottomUp), None)
        .unwrap();
    assert!(layout.is_complete());
    let y = |node: &str| session.state().position(&id(node)).unwrap().y;
    assert!(y("node2_kato:sent_1") < y("node1_kato:phr_cat"));
    assert!(y("node1_kato:phr_mat") < y("node0_kato:tok_mat"));

    let highlight = session.select(&id("node0_kato:tok_mat")).unwrap();
    assert_eq!(highlight.nodes.len(), 6);
    assert_eq!(highlight.edges.len(), 6);
}

#[tokio::test]
async fn test_trace_order_does_not_change_presence() {
    let queries = ["sent_loop", "phr_sat", "tok_cat"];

    let mut forward = session_from_file();
    for name in queries {
        forward.trace(&PatternGraphQuery::new(name).max_depth(2)).await.unwrap();
    }
    let mut backward = session_from_file();
    for name in queries.iter().rev() {
        backward.trace(&PatternGraphQuery::new(*name).max_depth(2)).await.unwrap();
    }

    let keys = |s: &GraphSession<InMemoryGateway>| {
        let snapshot = s.state().snapshot();
        (
            snapshot.nodes.into_iter().map(|n| n.id).collect::<Vec<_>>(),
            snapshot.edges.into_iter().map(|e| e.key()).collect::<Vec<_>>(),
        )
    };
    assert_eq!(keys(&forward), keys(&backward));
}

#[tokio::test]
async fn test_radial_layout_of_session() {
    let mut session = session_from_file();
    session
        .trace(&PatternGraphQuery::new("sent_1").max_depth(2))
        .await
        .unwrap();

    let spec = LayoutSpec::new(Discipline::RadialOut).center(id("node2_kato:sent_1"));
    let layout = session.layout(&spec, None).unwrap();

    assert!(layout.is_complete());
    let center = layout.position(&id("node2_kato:sent_1")).unwrap();
    assert_eq!((center.x, center.y), (0.0, 0.0));
}

#[tokio::test]
async fn test_snapshot_round_trips_through_json() {
    let mut session = session_from_file();
    session
        .trace(&PatternGraphQuery::new("phr_cat").max_depth(1))
        .await
        .unwrap();
    session.layout_default(None).unwrap();

    let json = serde_json::to_string(&session.state().snapshot()).unwrap();
    let restored: GraphSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.session_id, session.state().session_id);
    assert_eq!(restored.total_nodes, 4);
    assert_eq!(restored.positions.len(), 4);
    assert_eq!(restored.traced, vec![id("node1_kato:phr_cat")]);
}

#[tokio::test]
async fn test_reset_starts_over() {
    let mut session = session_from_file();
    session
        .trace(&PatternGraphQuery::new("phr_cat").max_depth(1))
        .await
        .unwrap();
    session.layout_default(None).unwrap();

    session.reset();

    assert!(session.state().is_empty());
    assert!(session.state().layout().is_none());
    assert!(session.state().position(&id("node1_kato:phr_cat")).is_none());
}
