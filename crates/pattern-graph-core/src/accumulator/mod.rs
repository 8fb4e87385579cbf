//! Session-scoped graph accumulation.
//!
//! [`GraphState`] is the append-only store that successive traces merge
//! into. [`GraphSession`] owns one state together with the gateway and the
//! configuration, and sequences trace, layout, selection and reset.
//!
//! # Lifecycle
//!
//! ```text
//! new (empty) --merge--> grows --merge--> ... --reset--> empty
//! ```

mod session;
mod state;

#[cfg(test)]
mod tests;

pub use session::{GraphSession, TraceOutcome};
pub use state::{merge, GraphSnapshot, GraphState, MergeReport};
