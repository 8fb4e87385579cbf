//! Bidirectional, depth-bounded trace over the pattern store.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::error::{GraphError, GraphResult};
use crate::extractor::{extract_references, payload_length};
use crate::gateway::{PatternGateway, PatternRecord};
use crate::types::{EdgeKey, KbId, NodeId, NodeSizing, PatternEdge, PatternNode, Relationship};

use super::types::{TraceParams, TraceResult};

/// Accumulates nodes and collapsed edges during one trace.
struct TraceBuilder {
    sizing: NodeSizing,
    nodes: Vec<PatternNode>,
    edges: Vec<PatternEdge>,
    edge_index: HashMap<EdgeKey, usize>,
    depth_reached: usize,
}

impl TraceBuilder {
    fn new(sizing: NodeSizing) -> Self {
        Self {
            sizing,
            nodes: Vec::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
            depth_reached: 0,
        }
    }

    fn add_node(&mut self, record: &PatternRecord, depth: usize) -> NodeId {
        let node = PatternNode::new(
            record.pattern_name.clone(),
            record.kb_id.clone(),
            record.level,
            record.frequency,
            &self.sizing,
        )
        .with_length(payload_length(&record.payload))
        .with_metadata(record.metadata.clone());
        let id = node.id.clone();
        self.nodes.push(node);
        self.depth_reached = self.depth_reached.max(depth);
        id
    }

    fn add_edge(&mut self, source: NodeId, target: NodeId, relationship: Relationship) {
        let Some(edge) = PatternEdge::new(source, target, relationship) else {
            return;
        };
        let key = edge.key();
        match self.edge_index.get(&key) {
            Some(&idx) => self.edges[idx].absorb(&edge),
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push(edge);
            }
        }
    }
}

/// Resolves referenced names to stored patterns, memoized per trace.
///
/// A name referenced from a pattern in KB `k` is looked up in `k.lower()`
/// first, then in any KB.
struct Resolver<'g, G: ?Sized> {
    gateway: &'g G,
    cache: HashMap<(String, Option<KbId>), Option<PatternRecord>>,
}

impl<'g, G: PatternGateway + ?Sized> Resolver<'g, G> {
    fn new(gateway: &'g G) -> Self {
        Self {
            gateway,
            cache: HashMap::new(),
        }
    }

    async fn referenced_from(
        &mut self,
        pattern_name: &str,
        referencing_kb: &KbId,
    ) -> GraphResult<Option<PatternRecord>> {
        let hint = referencing_kb.lower();
        let key = (pattern_name.to_string(), hint.clone());
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let mut record = match hint.as_ref() {
            Some(kb) => self.gateway.fetch_pattern(pattern_name, Some(kb)).await?,
            None => None,
        };
        if record.is_none() {
            record = self.gateway.fetch_pattern(pattern_name, None).await?;
        }

        self.cache.insert(key, record.clone());
        Ok(record)
    }
}

/// Trace the compositional neighbourhood of one pattern.
///
/// Each round expands every frontier pattern in both directions:
///
/// - **descendants**: references embedded in its payload, giving
///   `(p, d, composed_of)` edges;
/// - **ancestors**: patterns whose payload references it (gateway reverse
///   lookup), giving `(a, p, contains)` edges.
///
/// Newly seen endpoints form the next frontier and are marked visited as
/// they are discovered, so no pattern is expanded twice and cycles
/// terminate. Self references are dropped. Edges between already visited
/// patterns are still recorded.
///
/// # Returns
/// * `Ok(TraceResult)` - possibly flagged `not_found`
/// * `Err(GraphError::InvalidDepth)` - `max_depth` above the limit
/// * `Err(GraphError::StoreUnavailable)` - gateway failure, retryable
#[instrument(skip(gateway, params), fields(pattern = %params.origin_name(), max_depth = params.max_depth))]
pub async fn trace_pattern_graph<G>(gateway: &G, params: &TraceParams) -> GraphResult<TraceResult>
where
    G: PatternGateway + ?Sized,
{
    params.validate()?;
    let origin_name = params.origin_name();

    let Some(origin_record) = gateway
        .fetch_pattern(origin_name, params.kb_id.as_ref())
        .await?
    else {
        info!(kb = ?params.kb_id, "origin pattern not found");
        return Ok(TraceResult::not_found(origin_name));
    };

    let mut builder = TraceBuilder::new(params.sizing);
    let mut resolver = Resolver::new(gateway);
    let mut unresolved: BTreeSet<String> = BTreeSet::new();

    let origin_id = builder.add_node(&origin_record, 0);
    let mut visited: HashSet<NodeId> = HashSet::from([origin_id.clone()]);
    let mut frontier: Vec<PatternRecord> = vec![origin_record];
    let mut depth = 0;

    while depth < params.max_depth && !frontier.is_empty() {
        let mut next: Vec<PatternRecord> = Vec::new();

        for record in &frontier {
            let current = NodeId::new(&record.kb_id, &record.pattern_name);

            // Descendants: what this pattern is composed of.
            for child_name in extract_references(&record.payload) {
                let Some(child) = resolver.referenced_from(&child_name, &record.kb_id).await? else {
                    warn!(pattern = %current, reference = %child_name, "unresolved pattern reference");
                    unresolved.insert(child_name);
                    continue;
                };
                let child_id = NodeId::new(&child.kb_id, &child.pattern_name);
                if child_id == current {
                    debug!(pattern = %current, "dropping self reference");
                    continue;
                }
                builder.add_edge(current.clone(), child_id.clone(), Relationship::ComposedOf);
                if visited.insert(child_id) {
                    builder.add_node(&child, depth + 1);
                    next.push(child);
                }
            }

            // Ancestors: patterns that contain this one.
            for parent_ref in gateway.find_referencing_patterns(&record.pattern_name).await? {
                let parent_id = NodeId::new(&parent_ref.kb_id, &parent_ref.pattern_name);
                if parent_id == current {
                    continue;
                }
                // The parent must resolve the shared name to *this* pattern.
                let target = resolver
                    .referenced_from(&record.pattern_name, &parent_ref.kb_id)
                    .await?;
                if target.map(|t| NodeId::new(&t.kb_id, &t.pattern_name)).as_ref() != Some(&current) {
                    debug!(parent = %parent_id, pattern = %current, "reference resolves elsewhere, skipping");
                    continue;
                }

                if visited.contains(&parent_id) {
                    builder.add_edge(parent_id, current.clone(), Relationship::Contains);
                    continue;
                }
                let Some(parent) = gateway
                    .fetch_pattern(&parent_ref.pattern_name, Some(&parent_ref.kb_id))
                    .await?
                else {
                    warn!(parent = %parent_id, "referencing pattern vanished from store");
                    continue;
                };
                builder.add_edge(parent_id.clone(), current.clone(), Relationship::Contains);
                visited.insert(parent_id);
                builder.add_node(&parent, depth + 1);
                next.push(parent);
            }
        }

        debug!(depth, discovered = next.len(), "trace round complete");
        frontier = next;
        depth += 1;
    }

    info!(
        nodes = builder.nodes.len(),
        edges = builder.edges.len(),
        depth_reached = builder.depth_reached,
        unresolved = unresolved.len(),
        "pattern graph traced"
    );

    Ok(TraceResult {
        origin_pattern: origin_name.to_string(),
        origin: Some(origin_id),
        not_found: false,
        nodes: builder.nodes,
        edges: builder.edges,
        depth_reached: builder.depth_reached,
        unresolved: unresolved.into_iter().collect(),
    })
}

/// [`trace_pattern_graph`] bounded by a wall-clock budget.
///
/// # Returns
/// * `Err(GraphError::TraceTimeout)` - the trace did not finish in time
pub async fn trace_with_timeout<G>(
    gateway: &G,
    params: &TraceParams,
    timeout: Duration,
) -> GraphResult<TraceResult>
where
    G: PatternGateway + ?Sized,
{
    match tokio::time::timeout(timeout, trace_pattern_graph(gateway, params)).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(pattern = %params.origin_name(), timeout_ms, "trace timed out");
            Err(GraphError::TraceTimeout { timeout_ms })
        }
    }
}
