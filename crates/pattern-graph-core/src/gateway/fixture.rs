//! JSON fixture format for populating an [`InMemoryGateway`].
//!
//! ```json
//! {
//!   "patterns": [
//!     { "pattern_name": "abc", "kb_id": "node0_kato", "frequency": 4,
//!       "payload": [["Ġthe"], ["Ġcat"]] },
//!     { "pattern_name": "def", "kb_id": "node1_kato",
//!       "payload": [["PTRN|abc"]] }
//!   ]
//! }
//! ```
//!
//! `level` may be omitted and is then derived from the KB id.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{GraphError, GraphResult};
use crate::types::{KbId, REFERENCE_PREFIX};

use super::{InMemoryGateway, PatternRecord, ReverseLookup};

/// One pattern entry in a fixture file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturePattern {
    pub pattern_name: String,
    pub kb_id: KbId,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub frequency: u64,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl FixturePattern {
    fn into_record(self) -> GraphResult<PatternRecord> {
        self.kb_id.validate()?;
        let name = self
            .pattern_name
            .strip_prefix(REFERENCE_PREFIX)
            .unwrap_or(&self.pattern_name)
            .to_string();
        if name.is_empty() {
            return Err(GraphError::invalid_input(format!(
                "fixture pattern in {} has an empty name",
                self.kb_id
            )));
        }
        Ok(PatternRecord {
            pattern_name: name,
            level: self.level.unwrap_or_else(|| self.kb_id.level()),
            kb_id: self.kb_id,
            frequency: self.frequency,
            payload: self.payload,
            metadata: self.metadata,
        })
    }
}

/// Top-level fixture document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureFile {
    pub patterns: Vec<FixturePattern>,
}

impl InMemoryGateway {
    /// Parse a fixture document.
    pub fn from_json_str(json: &str, lookup: ReverseLookup) -> GraphResult<Self> {
        let fixture: FixtureFile = serde_json::from_str(json)?;
        let records = fixture
            .patterns
            .into_iter()
            .map(FixturePattern::into_record)
            .collect::<GraphResult<Vec<_>>>()?;
        info!(patterns = records.len(), ?lookup, "loaded pattern fixture");
        Ok(Self::from_records(records, lookup))
    }

    /// Read and parse a fixture file.
    pub fn from_json_file(path: &Path, lookup: ReverseLookup) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content, lookup)
    }
}
