//! CLI command implementations
//!
//! Each handler returns the process exit code; errors are logged and
//! printed to stderr, results go to stdout as JSON.

pub mod explore;
mod shared;
pub mod trace;
