//! Graph tracer: bounded discovery of a pattern's compositional
//! neighbourhood.
//!
//! Starting from one origin pattern, the tracer expands breadth-first in
//! both directions at once (what the pattern is composed of, and what
//! contains it) for up to `max_depth` rounds, producing a [`TraceResult`].
//!
//! # Example
//!
//! ```rust,ignore
//! use pattern_graph_core::tracer::{trace_pattern_graph, TraceParams};
//!
//! let params = TraceParams::new("abc123").kb("node1_kato").max_depth(2);
//! let result = trace_pattern_graph(&gateway, &params).await?;
//! if result.not_found {
//!     println!("pattern not found");
//! }
//! ```

mod traversal;
mod types;

#[cfg(test)]
mod tests;

pub use traversal::{trace_pattern_graph, trace_with_timeout};
pub use types::{TraceParams, TraceResult, TraceStats, DEFAULT_TRACE_DEPTH, MAX_TRACE_DEPTH};
