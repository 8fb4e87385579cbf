//! Reference extraction from arbitrary pattern payloads.
//!
//! Payloads are heterogeneous: a level-0 pattern is a list of
//! token events, higher levels embed `PTRN|{hash}` symbols, and metadata may
//! nest mappings anywhere. Extraction walks the whole value, inspecting
//! sequence elements and both keys and values of mappings, and collects
//! every well-formed reference token it finds.
//!
//! The walk uses an explicit stack, so deeply nested payloads cannot
//! overflow the call stack. Malformed tokens and non-string scalars are
//! skipped, never raised.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::types::REFERENCE_PREFIX;

/// Shape of a payload value, as far as extraction is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A string, the only scalar that can carry a reference.
    Text,
    /// Number, bool or null.
    OpaqueScalar,
    Sequence,
    Mapping,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::Text,
            Value::Null | Value::Bool(_) | Value::Number(_) => Self::OpaqueScalar,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }
}

/// Parse a single symbol as a pattern reference.
///
/// Returns the referenced pattern name, or `None` if `symbol` is not a
/// well-formed reference (missing prefix, empty name, or a name containing
/// whitespace or a further `|`).
pub fn parse_reference(symbol: &str) -> Option<&str> {
    let name = symbol.strip_prefix(REFERENCE_PREFIX)?;
    if name.is_empty() || name.contains('|') || name.chars().any(char::is_whitespace) {
        debug!(symbol, "skipping malformed pattern reference");
        return None;
    }
    Some(name)
}

/// Collect every pattern name referenced anywhere inside `payload`.
///
/// # Example
///
/// ```
/// use pattern_graph_core::extractor::extract_references;
/// use serde_json::json;
///
/// let refs = extract_references(&json!({"a": ["PTRN|x", {"b": "PTRN|y"}]}));
/// assert_eq!(refs.into_iter().collect::<Vec<_>>(), vec!["x", "y"]);
/// ```
pub fn extract_references(payload: &Value) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack: Vec<&Value> = vec![payload];

    while let Some(value) = stack.pop() {
        match (ValueKind::of(value), value) {
            (ValueKind::Text, Value::String(symbol)) => {
                if let Some(name) = parse_reference(symbol) {
                    found.insert(name.to_string());
                }
            }
            (ValueKind::Sequence, Value::Array(items)) => stack.extend(items.iter()),
            (ValueKind::Mapping, Value::Object(map)) => {
                for (key, inner) in map {
                    if let Some(name) = parse_reference(key) {
                        found.insert(name.to_string());
                    }
                    stack.push(inner);
                }
            }
            _ => {}
        }
    }

    found
}

/// Number of top-level elements in a payload. A bare scalar counts as one
/// element, null as none.
pub fn payload_length(payload: &Value) -> usize {
    match payload {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::Null => 0,
        _ => 1,
    }
}
