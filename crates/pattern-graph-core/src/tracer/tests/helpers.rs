//! Shared fixtures for tracer tests.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{GraphError, GraphResult};
use crate::gateway::{InMemoryGateway, PatternGateway, PatternRecord, PatternRef, ReverseLookup};
use crate::types::KbId;

pub fn record(name: &str, kb: &str, payload: Value) -> PatternRecord {
    let kb_id = KbId::from(kb);
    PatternRecord {
        pattern_name: name.to_string(),
        level: kb_id.level(),
        kb_id,
        frequency: 2,
        payload,
        metadata: Value::Null,
    }
}

pub fn refs(names: &[&str]) -> Value {
    Value::Array(names.iter().map(|n| json!([format!("PTRN|{n}")])).collect())
}

/// Three-level hierarchy:
///
/// ```text
///   node2:        p1
///                /  \
///   node1:     s1    s2
///             /  \  /  \
///   node0:   b    a     c
/// ```
pub fn hierarchy(lookup: ReverseLookup) -> InMemoryGateway {
    InMemoryGateway::from_records(
        vec![
            record("a", "node0_kato", json!([["Ġthe"], ["Ġcat"]])),
            record("b", "node0_kato", json!([["Ġsat"]])),
            record("c", "node0_kato", json!([["Ġmat"]])),
            record("s1", "node1_kato", refs(&["a", "b"])),
            record("s2", "node1_kato", refs(&["a", "c"])),
            record("p1", "node2_kato", refs(&["s1", "s2"])),
        ],
        lookup,
    )
}

/// Gateway whose store is unreachable.
pub struct OfflineGateway;

#[async_trait]
impl PatternGateway for OfflineGateway {
    async fn fetch_pattern(&self, _: &str, _: Option<&KbId>) -> GraphResult<Option<PatternRecord>> {
        Err(GraphError::store_unavailable("connection refused"))
    }

    async fn find_referencing_patterns(&self, _: &str) -> GraphResult<Vec<PatternRef>> {
        Err(GraphError::store_unavailable("connection refused"))
    }
}

/// Gateway that answers only after a long delay.
pub struct SlowGateway {
    pub inner: InMemoryGateway,
    pub delay: Duration,
}

#[async_trait]
impl PatternGateway for SlowGateway {
    async fn fetch_pattern(&self, name: &str, kb: Option<&KbId>) -> GraphResult<Option<PatternRecord>> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_pattern(name, kb).await
    }

    async fn find_referencing_patterns(&self, name: &str) -> GraphResult<Vec<PatternRef>> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_referencing_patterns(name).await
    }
}
