//! Shared fixtures for the integration tests.
//!
//! - `fixtures`: pattern store documents and gateway builders
//! - `helpers`: assertions over responses and graph state

pub mod fixtures;
pub mod helpers;
