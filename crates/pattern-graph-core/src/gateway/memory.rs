//! In-memory pattern store.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::GraphResult;
use crate::extractor::extract_references;
use crate::types::KbId;

use super::{PatternGateway, PatternRecord, PatternRef};

/// Strategy used to answer `find_referencing_patterns`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReverseLookup {
    /// Reverse index maintained on every insert.
    #[default]
    Indexed,
    /// Extract references from every stored pattern on each lookup.
    Scan,
}

#[derive(Debug, Default)]
struct Inner {
    kbs: HashMap<KbId, BTreeMap<String, PatternRecord>>,
    reverse: HashMap<String, BTreeSet<PatternRef>>,
}

impl Inner {
    fn insert(&mut self, record: PatternRecord) {
        let location = PatternRef {
            pattern_name: record.pattern_name.clone(),
            kb_id: record.kb_id.clone(),
        };
        let previous = self
            .kbs
            .get(&record.kb_id)
            .and_then(|kb| kb.get(&record.pattern_name))
            .map(|old| extract_references(&old.payload));
        for stale in previous.into_iter().flatten() {
            if let Some(refs) = self.reverse.get_mut(&stale) {
                refs.remove(&location);
            }
        }
        for referenced in extract_references(&record.payload) {
            self.reverse
                .entry(referenced)
                .or_default()
                .insert(location.clone());
        }
        self.kbs
            .entry(record.kb_id.clone())
            .or_default()
            .insert(record.pattern_name.clone(), record);
    }

    /// KB ids sorted by (level, id).
    fn kbs_in_level_order(&self) -> Vec<&KbId> {
        let mut ids: Vec<&KbId> = self.kbs.keys().collect();
        ids.sort_by(|a, b| a.level().cmp(&b.level()).then_with(|| a.cmp(b)));
        ids
    }

    fn scan_referencing(&self, pattern_name: &str) -> Vec<PatternRef> {
        let mut found = BTreeSet::new();
        for kb in self.kbs_in_level_order() {
            for record in self.kbs[kb].values() {
                if extract_references(&record.payload).contains(pattern_name) {
                    found.insert(PatternRef {
                        pattern_name: record.pattern_name.clone(),
                        kb_id: record.kb_id.clone(),
                    });
                }
            }
        }
        found.into_iter().collect()
    }
}

/// In-memory gateway for tests, fixtures and the CLI.
///
/// Uses HashMaps behind a tokio `RwLock`; clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    inner: Arc<RwLock<Inner>>,
    lookup: ReverseLookup,
}

impl InMemoryGateway {
    /// Create an empty gateway using the indexed reverse lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty gateway with the given reverse lookup strategy.
    pub fn with_lookup(lookup: ReverseLookup) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            lookup,
        }
    }

    /// Build a gateway pre-populated with `records`.
    pub fn from_records(records: impl IntoIterator<Item = PatternRecord>, lookup: ReverseLookup) -> Self {
        let mut inner = Inner::default();
        for record in records {
            inner.insert(record);
        }
        Self {
            inner: Arc::new(RwLock::new(inner)),
            lookup,
        }
    }

    pub fn lookup(&self) -> ReverseLookup {
        self.lookup
    }

    /// Store a pattern, replacing any previous pattern with the same
    /// (kb_id, pattern_name).
    pub async fn insert(&self, record: PatternRecord) {
        let mut inner = self.inner.write().await;
        inner.insert(record);
    }

    /// Total number of stored patterns across all KBs.
    pub async fn len(&self) -> usize {
        let inner = self.inner.read().await;
        inner.kbs.values().map(BTreeMap::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// KB ids in hierarchy order.
    pub async fn kb_ids(&self) -> Vec<KbId> {
        let inner = self.inner.read().await;
        inner.kbs_in_level_order().into_iter().cloned().collect()
    }
}

#[async_trait]
impl PatternGateway for InMemoryGateway {
    async fn fetch_pattern(
        &self,
        pattern_name: &str,
        kb_id: Option<&KbId>,
    ) -> GraphResult<Option<PatternRecord>> {
        let inner = self.inner.read().await;
        let record = match kb_id {
            Some(kb) => inner.kbs.get(kb).and_then(|kb| kb.get(pattern_name)),
            None => inner
                .kbs_in_level_order()
                .into_iter()
                .find_map(|kb| inner.kbs[kb].get(pattern_name)),
        };
        Ok(record.cloned())
    }

    async fn find_referencing_patterns(&self, pattern_name: &str) -> GraphResult<Vec<PatternRef>> {
        let inner = self.inner.read().await;
        let refs = match self.lookup {
            ReverseLookup::Indexed => inner
                .reverse
                .get(pattern_name)
                .map(|refs| refs.iter().cloned().collect())
                .unwrap_or_default(),
            ReverseLookup::Scan => inner.scan_referencing(pattern_name),
        };
        debug!(pattern_name, found = refs.len(), lookup = ?self.lookup, "reverse lookup");
        Ok(refs)
    }
}
