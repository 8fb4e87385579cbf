//! Pattern store gateway.
//!
//! The engine never talks to a database directly. Everything it needs from
//! the store goes through [`PatternGateway`]:
//!
//! - [`fetch_pattern`](PatternGateway::fetch_pattern): one pattern's payload
//!   and metadata, optionally pinned to a KB.
//! - [`find_referencing_patterns`](PatternGateway::find_referencing_patterns):
//!   reverse lookup of the patterns whose payload references a name.
//!
//! How the reverse lookup is answered (maintained index or scan) is the
//! implementation's business. [`InMemoryGateway`] offers both.

mod fixture;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GraphResult;
use crate::types::KbId;

pub use fixture::{FixtureFile, FixturePattern};
pub use memory::{InMemoryGateway, ReverseLookup};

/// A pattern as stored: identity, level and raw payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub pattern_name: String,
    pub kb_id: KbId,
    pub level: u32,
    /// Observation count, 0 when the store does not track it.
    #[serde(default)]
    pub frequency: u64,
    /// Pattern body; may embed `PTRN|{name}` references anywhere.
    pub payload: serde_json::Value,
    /// Opaque extra fields passed through to the graph node.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Location of a pattern, as returned by reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternRef {
    pub pattern_name: String,
    pub kb_id: KbId,
}

/// Read-only access to the pattern store.
///
/// Errors are reserved for store failures and should be
/// [`GraphError::StoreUnavailable`](crate::error::GraphError::StoreUnavailable)
/// so callers can offer a retry. A missing pattern is `Ok(None)`.
#[async_trait]
pub trait PatternGateway: Send + Sync {
    /// Fetch a pattern by name. With `kb_id = None` the gateway searches all
    /// KBs, lowest level first, and returns the first match.
    async fn fetch_pattern(
        &self,
        pattern_name: &str,
        kb_id: Option<&KbId>,
    ) -> GraphResult<Option<PatternRecord>>;

    /// All patterns whose payload references `pattern_name`.
    async fn find_referencing_patterns(&self, pattern_name: &str) -> GraphResult<Vec<PatternRef>>;
}
