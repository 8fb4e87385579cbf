//! Consumer query against fixture stores.

use pattern_graph_core::{
    run_query, GraphConfig, GraphError, InMemoryGateway, PatternGraphQuery, Relationship,
    ReverseLookup, MSG_PATTERN_NOT_FOUND,
};

use crate::common::fixtures::{gateway, P_D1_D2};
use crate::common::helpers::{count_of, edge_counts, id, node_ids};

#[tokio::test]
async fn test_origin_with_two_descendants() {
    let gateway = InMemoryGateway::from_json_str(P_D1_D2, ReverseLookup::Indexed).unwrap();
    let query = PatternGraphQuery::new("P").max_depth(1);

    let response = run_query(&gateway, &query, &GraphConfig::default_config()).await.unwrap();

    assert_eq!(
        node_ids(&response),
        [id("node1_kato:P"), id("node0_kato:D1"), id("node0_kato:D2")].into_iter().collect()
    );
    assert_eq!(response.total_edges, 2);
    for edge in &response.edges {
        assert_eq!(edge.source, id("node1_kato:P"));
        assert_eq!(edge.relationship, Relationship::ComposedOf);
        assert_eq!(edge.reference_count, 1);
    }
    assert_eq!(response.origin.map(|o| o.id), Some(id("node1_kato:P")));
}

#[tokio::test]
async fn test_depth_two_from_sentence() {
    let gateway = gateway(ReverseLookup::Indexed);
    let query = PatternGraphQuery::new("PTRN|sent_1").max_depth(2);

    let response = run_query(&gateway, &query, &GraphConfig::default_config()).await.unwrap();

    assert!(!response.not_found);
    assert_eq!(response.total_nodes, 9);
    assert_eq!(response.depth_reached, 2);
    assert_eq!(response.unresolved, vec!["missing".to_string()]);

    let origin = response.origin.as_ref().unwrap();
    assert_eq!(origin.level, 2);
    assert_eq!(origin.metadata["source"], "fixture");
    assert_eq!(origin.label, "PTRN|sent_1");

    // Found as a descendant in round one and again as an ancestor in round two.
    assert_eq!(count_of(&response.edges, "node2_kato:sent_1", "node1_kato:phr_cat"), Some(2));
    // Same-level reference resolved after the lower KB came up empty.
    assert!(count_of(&response.edges, "node2_kato:sent_loop", "node2_kato:sent_1").is_some());
    assert!(response.edges.iter().all(|e| e.source != e.target));
}

#[tokio::test]
async fn test_frequency_drives_visual_size() {
    let gateway = gateway(ReverseLookup::Indexed);
    let query = PatternGraphQuery::new("phr_cat").max_depth(1);

    let response = run_query(&gateway, &query, &GraphConfig::default_config()).await.unwrap();

    let size = |name: &str| {
        response
            .nodes
            .iter()
            .find(|n| n.pattern_name == name)
            .map(|n| n.visual_size)
            .unwrap()
    };
    assert!(size("tok_the") > size("tok_cat"));
}

#[tokio::test]
async fn test_lookup_strategies_agree() {
    let config = GraphConfig::default_config();
    for name in ["sent_1", "phr_mat", "tok_the", "sent_loop"] {
        let query = PatternGraphQuery::new(name).max_depth(3);
        let indexed = run_query(&gateway(ReverseLookup::Indexed), &query, &config).await.unwrap();
        let scanned = run_query(&gateway(ReverseLookup::Scan), &query, &config).await.unwrap();

        assert_eq!(node_ids(&indexed), node_ids(&scanned), "{name}");
        assert_eq!(edge_counts(&indexed.edges), edge_counts(&scanned.edges), "{name}");
    }
}

#[tokio::test]
async fn test_missing_pattern_is_flagged() {
    let gateway = gateway(ReverseLookup::Indexed);
    let query = PatternGraphQuery::new("does_not_exist");

    let response = run_query(&gateway, &query, &GraphConfig::default_config()).await.unwrap();

    assert!(response.not_found);
    assert!(response.nodes.is_empty());
    assert_eq!(response.message.as_deref(), Some(MSG_PATTERN_NOT_FOUND));
}

#[tokio::test]
async fn test_kb_hint_pins_origin() {
    let gateway = gateway(ReverseLookup::Indexed);
    let query = PatternGraphQuery::new("tok_the").kb("node1_kato").max_depth(1);

    let response = run_query(&gateway, &query, &GraphConfig::default_config()).await.unwrap();

    assert!(response.not_found, "tok_the lives in node0_kato only");
}

#[tokio::test]
async fn test_depth_out_of_range() {
    let gateway = gateway(ReverseLookup::Indexed);
    let config = GraphConfig::default_config();

    for depth in [0, 6] {
        let query = PatternGraphQuery::new("sent_1").max_depth(depth);
        let err = run_query(&gateway, &query, &config).await.unwrap_err();
        assert!(matches!(err, GraphError::InvalidDepth { .. }));
        assert!(!err.is_retryable());
    }
}

#[tokio::test]
async fn test_response_serializes_for_ui() {
    let gateway = gateway(ReverseLookup::Indexed);
    let query = PatternGraphQuery::new("phr_sat").max_depth(1);

    let response = run_query(&gateway, &query, &GraphConfig::default_config()).await.unwrap();
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["total_nodes"], 3);
    assert_eq!(value["origin"]["id"], "node1_kato:phr_sat");
    assert_eq!(value["unresolved"][0], "missing");
    assert!(value.get("message").is_none());
}
