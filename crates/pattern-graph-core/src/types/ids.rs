//! Identifier types: knowledge-base ids and graph node ids.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Level assigned to patterns whose KB id does not follow `node{N}_*`.
pub const UNKNOWN_LEVEL: u32 = 999;

/// Separator between the KB and pattern name parts of a [`NodeId`].
pub const NODE_ID_SEPARATOR: char = ':';

/// Knowledge-base identifier, conventionally `node{N}_{suffix}` where `N`
/// is the hierarchy level (e.g. `node0_kato`).
///
/// Must be non-empty and free of [`NODE_ID_SEPARATOR`]; see [`KbId::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KbId(String);

impl KbId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reject ids that would make [`NodeId`] ambiguous.
    ///
    /// Pattern names may contain the separator; node ids split on its first
    /// occurrence, so only the KB part has to be free of it.
    pub fn validate(&self) -> GraphResult<()> {
        if self.0.is_empty() {
            return Err(GraphError::invalid_input("kb id must not be empty"));
        }
        if self.0.contains(NODE_ID_SEPARATOR) {
            return Err(GraphError::invalid_input(format!(
                "kb id {:?} must not contain {:?}",
                self.0, NODE_ID_SEPARATOR
            )));
        }
        Ok(())
    }

    /// Parse the hierarchy level out of the id, if it follows the convention.
    pub fn parsed_level(&self) -> Option<u32> {
        let head = self.0.split('_').next()?;
        head.strip_prefix("node")?.parse().ok()
    }

    /// Hierarchy level, [`UNKNOWN_LEVEL`] for unconventional ids.
    pub fn level(&self) -> u32 {
        self.parsed_level().unwrap_or(UNKNOWN_LEVEL)
    }

    /// KB one level down: the tier whose patterns this KB's patterns are
    /// composed of.
    pub fn lower(&self) -> Option<KbId> {
        let level = self.parsed_level()?;
        if level == 0 {
            return None;
        }
        Some(self.with_level(level - 1))
    }

    /// KB one level up: the tier whose patterns may reference this KB's
    /// patterns.
    pub fn upper(&self) -> Option<KbId> {
        let level = self.parsed_level()?;
        Some(self.with_level(level + 1))
    }

    fn with_level(&self, level: u32) -> KbId {
        match self.0.split_once('_') {
            Some((_, suffix)) => KbId(format!("node{level}_{suffix}")),
            None => KbId(format!("node{level}")),
        }
    }
}

impl fmt::Display for KbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KbId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for KbId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Graph node identifier, `"{kb_id}:{pattern_name}"`.
///
/// One pattern name may exist in several KBs; the pair is what is unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(kb_id: &KbId, pattern_name: &str) -> Self {
        Self(format!("{}{}{}", kb_id.as_str(), NODE_ID_SEPARATOR, pattern_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pattern name component (everything after the first `:`).
    pub fn pattern_name(&self) -> &str {
        self.0
            .split_once(NODE_ID_SEPARATOR)
            .map_or(self.0.as_str(), |(_, name)| name)
    }

    /// KB component (everything before the first `:`).
    pub fn kb_id(&self) -> KbId {
        KbId::new(self.0.split_once(NODE_ID_SEPARATOR).map_or("", |(kb, _)| kb))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
