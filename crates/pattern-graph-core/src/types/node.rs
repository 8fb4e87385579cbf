//! Pattern nodes.

use serde::{Deserialize, Serialize};

use super::ids::{KbId, NodeId};

/// Prefix marking a pattern reference inside a payload.
pub const REFERENCE_PREFIX: &str = "PTRN|";

/// Number of pattern-name characters shown in a node label.
const LABEL_HASH_CHARS: usize = 8;

/// Parameters of the frequency -> visual size mapping.
///
/// `size = base + scale * ln(frequency + 1)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSizing {
    pub base: f64,
    pub scale: f64,
}

impl Default for NodeSizing {
    fn default() -> Self {
        Self {
            base: 10.0,
            scale: 4.0,
        }
    }
}

impl NodeSizing {
    pub fn size_for(&self, frequency: u64) -> f64 {
        self.base + self.scale * ((frequency as f64) + 1.0).ln()
    }
}

/// One learned pattern as a graph node.
///
/// `id` and `(pattern_name, kb_id)` determine each other. `level` is fixed
/// once the node has been created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternNode {
    pub id: NodeId,
    /// Content hash of the pattern, without the reference prefix.
    pub pattern_name: String,
    pub kb_id: KbId,
    pub level: u32,
    /// Observation count reported by the store (0 when unknown).
    pub frequency: u64,
    /// Number of top-level elements in the pattern payload.
    pub length: usize,
    /// Short display label, e.g. `PTRN|abc12345...`.
    pub label: String,
    /// Opaque metadata carried through from the store.
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub visual_size: f64,
}

impl PatternNode {
    pub fn new(
        pattern_name: impl Into<String>,
        kb_id: KbId,
        level: u32,
        frequency: u64,
        sizing: &NodeSizing,
    ) -> Self {
        let pattern_name = pattern_name.into();
        Self {
            id: NodeId::new(&kb_id, &pattern_name),
            label: display_label(&pattern_name),
            pattern_name,
            kb_id,
            level,
            frequency,
            length: 0,
            metadata: serde_json::Value::Null,
            visual_size: sizing.size_for(frequency),
        }
    }

    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Truncated display label for a pattern name.
pub fn display_label(pattern_name: &str) -> String {
    let short: String = pattern_name.chars().take(LABEL_HASH_CHARS).collect();
    if short.len() < pattern_name.len() {
        format!("{REFERENCE_PREFIX}{short}...")
    } else {
        format!("{REFERENCE_PREFIX}{short}")
    }
}
