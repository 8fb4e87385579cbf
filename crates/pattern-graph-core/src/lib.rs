//! Hierarchical pattern-relationship graph engine.
//!
//! Discovers compositional relationships between learned patterns stored
//! across hierarchy levels (knowledge bases `node0_*`, `node1_*`, ...),
//! accumulates successive discoveries into one deduplicated graph, lays it
//! out, and highlights connected components.
//!
//! # Architecture
//!
//! - **types**: node/edge/id data model
//! - **extractor**: `PTRN|{name}` reference extraction from arbitrary payloads
//! - **gateway**: pattern store trait and in-memory implementation
//! - **tracer**: depth-bounded bidirectional BFS over the store
//! - **accumulator**: append-only session graph, merge and session orchestration
//! - **layout**: hierarchical, radial and force layout disciplines
//! - **highlight**: undirected connected-component highlighting
//! - **query**: consumer-facing request/response
//! - **config**: layered configuration
//! - **error**: `GraphError` / `GraphResult`
//!
//! # Data flow
//!
//! ```text
//! query -> tracer (gateway + extractor) -> TraceResult
//!       -> accumulator merge -> GraphState -> layout -> highlight
//! ```
//!
//! # Example
//!
//! ```
//! use pattern_graph_core::{highlight_component, NodeId, PatternEdge, Relationship};
//!
//! let edge = PatternEdge::new("node1_kb:s".into(), "node0_kb:a".into(), Relationship::ComposedOf)
//!     .expect("not a self-loop");
//! let highlight = highlight_component(&NodeId::from("node0_kb:a"), &[edge]);
//! assert_eq!(highlight.nodes.len(), 2);
//! ```

pub mod accumulator;
pub mod config;
pub mod error;
pub mod extractor;
pub mod gateway;
pub mod highlight;
pub mod layout;
pub mod query;
pub mod tracer;
pub mod types;

// Re-exports for convenience
pub use accumulator::{merge, GraphSession, GraphSnapshot, GraphState, MergeReport, TraceOutcome};
pub use config::{GraphConfig, LayoutConfig, LoggingConfig, TraceConfig};
pub use error::{GraphError, GraphResult, MSG_PATTERN_NOT_FOUND, MSG_STORE_RETRY};
pub use extractor::{extract_references, parse_reference};
pub use gateway::{InMemoryGateway, PatternGateway, PatternRecord, PatternRef, ReverseLookup};
pub use highlight::{highlight_component, Highlight};
pub use layout::{
    compute_layout, AngularMode, Discipline, ForceInput, ForceLink, ForceNode, ForceSimulator,
    LayoutOutcome, LayoutSpec, PositionedNode,
};
pub use query::{run_query, PatternGraphQuery, PatternGraphResponse};
pub use tracer::{
    trace_pattern_graph, trace_with_timeout, TraceParams, TraceResult, TraceStats,
    DEFAULT_TRACE_DEPTH, MAX_TRACE_DEPTH,
};
pub use types::{
    EdgeKey, KbId, NodeId, NodeSizing, PatternEdge, PatternNode, Position, Relationship,
    REFERENCE_PREFIX,
};
