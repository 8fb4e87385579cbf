//! Configuration files driving the engine.

use std::sync::Arc;

use pattern_graph_core::{
    run_query, AngularMode, Discipline, GraphConfig, GraphError, GraphSession, PatternGraphQuery,
    ReverseLookup,
};

use crate::common::fixtures::{gateway, temp_file};

#[tokio::test]
async fn test_file_config_sets_default_depth() {
    let file = temp_file(
        r#"
[trace]
default_max_depth = 1
timeout_ms = 2000
"#,
        ".toml",
    );
    let config = GraphConfig::from_file(file.path()).unwrap();
    assert_eq!(config.trace.max_depth_limit, 5);

    let response = run_query(&gateway(ReverseLookup::Indexed), &PatternGraphQuery::new("sent_1"), &config)
        .await
        .unwrap();

    // Depth 1: the three phrases plus the referencing sent_loop.
    assert_eq!(response.total_nodes, 5);
    assert_eq!(response.depth_reached, 1);
}

#[tokio::test]
async fn test_file_config_sets_default_layout() {
    let file = temp_file(
        r#"
[layout]
default_discipline = "radial-in"
angular_mode = "even"
ring_spacing = 50.0
node_spacing = 20.0
"#,
        ".toml",
    );
    let config = GraphConfig::from_file(file.path()).unwrap();
    assert_eq!(config.layout.default_discipline, Discipline::RadialIn);
    assert_eq!(config.layout.angular_mode, AngularMode::Even);

    let mut session = GraphSession::new(Arc::new(gateway(ReverseLookup::Indexed)), config);
    session
        .trace(&PatternGraphQuery::new("phr_mat").max_depth(1))
        .await
        .unwrap();
    let layout = session.layout_default(None).unwrap();

    assert!(layout.is_complete());
    let farthest = layout
        .positions
        .values()
        .map(|p| (p.x * p.x + p.y * p.y).sqrt())
        .fold(0.0, f64::max);
    assert!((farthest - 100.0).abs() < 1e-6, "farthest ring at {farthest}");
}

#[test]
fn test_depth_limit_above_five_rejected() {
    let file = temp_file("[trace]\nmax_depth_limit = 9\n", ".toml");
    let err = GraphConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, GraphError::InvalidConfig(_)));
}

#[test]
fn test_unknown_discipline_rejected() {
    let file = temp_file("[layout]\ndefault_discipline = \"spiral\"\n", ".toml");
    assert!(GraphConfig::from_file(file.path()).is_err());
}
