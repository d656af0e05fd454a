//! In-memory link graph store.
//!
//! All state lives in plain maps behind one `parking_lot::RwLock`. A single
//! lock, rather than per-entity locking, is what keeps each compound
//! check-then-write sequence (URL dedup, endpoint validation, pair dedup)
//! atomic with respect to other writers. Lock hold time is bounded by one
//! adjacency list for writes and one full map pass for range scans; that is
//! the known scalability ceiling of this backend.
//!
//! Every value crossing the store boundary is a copy. Nothing a caller holds
//! aliases internal state, so the only way to mutate the graph is through the
//! [`Graph`] operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::core::config::StoreConfig;
use crate::core::error::{Error, Result};
use crate::graph::{Edge, EdgeId, EdgeIterator, Graph, Link, LinkId, LinkIterator, SnapshotIter};

/// Mutable graph state. Guarded as a unit by the store's lock.
struct GraphState {
    /// Primary link map.
    links: HashMap<LinkId, Link>,
    /// Primary edge map.
    edges: HashMap<EdgeId, Edge>,
    /// Business-key index: URL to link identifier.
    link_url_index: HashMap<String, LinkId>,
    /// Outgoing adjacency: source link to its edge identifiers.
    link_edge_map: HashMap<LinkId, Vec<EdgeId>>,
}

/// In-memory [`Graph`] backend.
///
/// Suitable for tests and small crawls; the persistent backend shares the
/// same trait for production use. Safe to share across threads behind an
/// `Arc`.
pub struct InMemoryGraph {
    inner: RwLock<GraphState>,
}

impl InMemoryGraph {
    /// Create an empty store with default capacities.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Create an empty store pre-sized from a configuration.
    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            inner: RwLock::new(GraphState {
                links: HashMap::with_capacity(config.initial_link_capacity),
                edges: HashMap::with_capacity(config.initial_edge_capacity),
                link_url_index: HashMap::with_capacity(config.initial_link_capacity),
                link_edge_map: HashMap::with_capacity(config.initial_link_capacity),
            }),
        }
    }

    /// Number of links currently stored.
    pub fn link_count(&self) -> usize {
        self.inner.read().links.len()
    }

    /// Number of edges currently stored.
    pub fn edge_count(&self) -> usize {
        self.inner.read().edges.len()
    }
}

impl Default for InMemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph for InMemoryGraph {
    fn upsert_link(&self, link: &mut Link) -> Result<()> {
        let mut state = self.inner.write();

        // Identity is always resolved by URL; a caller-supplied id is
        // overwritten with the stored one.
        if let Some(id) = state.link_url_index.get(&link.url).copied() {
            if let Some(existing) = state.links.get_mut(&id) {
                existing.retrieved_at = existing.retrieved_at.max(link.retrieved_at);
                *link = existing.clone();
                debug!(id = %id, url = %link.url, "link upsert refreshed existing entry");
                return Ok(());
            }
        }

        let mut id = LinkId::random();
        while state.links.contains_key(&id) {
            id = LinkId::random();
        }
        link.id = id;
        state.links.insert(id, link.clone());
        state.link_url_index.insert(link.url.clone(), id);
        debug!(id = %id, url = %link.url, "link inserted");
        Ok(())
    }

    fn find_link(&self, id: LinkId) -> Result<Link> {
        let state = self.inner.read();
        state.links.get(&id).cloned().ok_or(Error::NotFound(id))
    }

    fn upsert_edge(&self, edge: &mut Edge) -> Result<()> {
        let mut state = self.inner.write();

        if !state.links.contains_key(&edge.src) || !state.links.contains_key(&edge.dst) {
            return Err(Error::UnknownEndpoint {
                src: edge.src,
                dst: edge.dst,
            });
        }

        // Scan the source's outgoing edges for the same (src, dst) pair.
        let dst = edge.dst;
        let existing_id = state.link_edge_map.get(&edge.src).and_then(|ids| {
            ids.iter()
                .copied()
                .find(|id| state.edges.get(id).is_some_and(|e| e.dst == dst))
        });
        if let Some(id) = existing_id {
            if let Some(existing) = state.edges.get_mut(&id) {
                existing.updated_at = Utc::now();
                *edge = *existing;
                debug!(id = %id, "edge upsert refreshed existing pair");
                return Ok(());
            }
        }

        let mut id = EdgeId::random();
        while state.edges.contains_key(&id) {
            id = EdgeId::random();
        }
        edge.id = id;
        edge.updated_at = Utc::now();
        state.edges.insert(id, *edge);
        state.link_edge_map.entry(edge.src).or_default().push(id);
        debug!(id = %id, src = %edge.src, dst = %edge.dst, "edge inserted");
        Ok(())
    }

    fn remove_stale_edges(&self, from: LinkId, updated_before: DateTime<Utc>) -> Result<()> {
        let mut state = self.inner.write();

        let Some(edge_ids) = state.link_edge_map.remove(&from) else {
            return Ok(());
        };

        let mut survivors = Vec::with_capacity(edge_ids.len());
        let mut removed = 0_usize;
        for edge_id in edge_ids {
            let stale = state
                .edges
                .get(&edge_id)
                .is_some_and(|e| e.updated_at < updated_before);
            if stale {
                state.edges.remove(&edge_id);
                removed += 1;
            } else {
                survivors.push(edge_id);
            }
        }
        state.link_edge_map.insert(from, survivors);
        debug!(from = %from, removed, "removed stale edges");
        Ok(())
    }

    fn links(
        &self,
        from: LinkId,
        to: LinkId,
        retrieved_before: DateTime<Utc>,
    ) -> Result<LinkIterator> {
        let (from, to) = (from.to_string(), to.to_string());

        let state = self.inner.read();
        let list: Vec<Link> = state
            .links
            .iter()
            .filter(|(id, link)| {
                let key = id.to_string();
                key >= from && key < to && link.retrieved_at < retrieved_before
            })
            .map(|(_, link)| link.clone())
            .collect();
        drop(state);

        Ok(Box::new(SnapshotIter::new(list)))
    }

    fn edges(
        &self,
        from: LinkId,
        to: LinkId,
        updated_before: DateTime<Utc>,
    ) -> Result<EdgeIterator> {
        let (from, to) = (from.to_string(), to.to_string());

        let state = self.inner.read();
        let mut list = Vec::new();
        for link_id in state.links.keys() {
            let key = link_id.to_string();
            if key < from || key >= to {
                continue;
            }
            let Some(edge_ids) = state.link_edge_map.get(link_id) else {
                continue;
            };
            for edge_id in edge_ids {
                if let Some(edge) = state.edges.get(edge_id) {
                    if edge.updated_at < updated_before {
                        list.push(*edge);
                    }
                }
            }
        }
        drop(state);

        Ok(Box::new(SnapshotIter::new(list)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Duration;
    use uuid::Uuid;

    use super::*;

    fn far_future() -> DateTime<Utc> {
        Utc::now() + Duration::hours(1)
    }

    fn upsert(store: &InMemoryGraph, url: &str, retrieved_at: DateTime<Utc>) -> Link {
        let mut link = Link::new(url, retrieved_at);
        store.upsert_link(&mut link).unwrap();
        link
    }

    fn successor(id: LinkId) -> LinkId {
        LinkId::from_uuid(Uuid::from_u128(id.as_uuid().as_u128() + 1))
    }

    fn collect_links(mut iter: LinkIterator) -> Vec<Link> {
        let mut out = Vec::new();
        while iter.advance() {
            out.push(iter.current().unwrap());
        }
        assert!(iter.error().is_none());
        iter.close().unwrap();
        out
    }

    fn collect_edges(mut iter: EdgeIterator) -> Vec<Edge> {
        let mut out = Vec::new();
        while iter.advance() {
            out.push(iter.current().unwrap());
        }
        assert!(iter.error().is_none());
        iter.close().unwrap();
        out
    }

    #[test]
    fn upsert_link_assigns_id() {
        let store = InMemoryGraph::new();
        let link = upsert(&store, "http://a", Utc::now());
        assert!(!link.id.is_nil());
        assert_eq!(store.link_count(), 1);
    }

    #[test]
    fn upsert_link_is_idempotent_by_url() {
        let store = InMemoryGraph::new();
        let t0 = Utc::now();
        let t1 = t0 + Duration::minutes(5);

        let first = upsert(&store, "http://a", t0);
        let second = upsert(&store, "http://a", t1);

        assert_eq!(first.id, second.id);
        assert_eq!(second.retrieved_at, t1);
        assert_eq!(store.link_count(), 1);
    }

    #[test]
    fn stored_timestamp_never_regresses() {
        let store = InMemoryGraph::new();
        let t0 = Utc::now();
        let older = t0 - Duration::minutes(5);

        let link = upsert(&store, "http://a", t0);
        let refreshed = upsert(&store, "http://a", older);

        assert_eq!(refreshed.retrieved_at, t0);
        assert_eq!(store.find_link(link.id).unwrap().retrieved_at, t0);
    }

    #[test]
    fn upsert_link_ignores_caller_supplied_id() {
        let store = InMemoryGraph::new();
        let stored = upsert(&store, "http://a", Utc::now());

        let mut resubmit = Link::new("http://a", Utc::now());
        resubmit.id = LinkId::random();
        store.upsert_link(&mut resubmit).unwrap();

        assert_eq!(resubmit.id, stored.id);
        assert_eq!(store.link_count(), 1);
    }

    #[test]
    fn find_link_unknown_id_is_not_found() {
        let store = InMemoryGraph::new();
        let err = store.find_link(LinkId::random()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn find_link_returns_defensive_copy() {
        let store = InMemoryGraph::new();
        let link = upsert(&store, "http://a", Utc::now());

        let mut copy = store.find_link(link.id).unwrap();
        copy.url = "http://mangled".to_owned();

        assert_eq!(store.find_link(link.id).unwrap().url, "http://a");
    }

    #[test]
    fn upsert_edge_rejects_unknown_endpoints() {
        let store = InMemoryGraph::new();
        let known = upsert(&store, "http://a", Utc::now());

        let mut edge = Edge::new(known.id, LinkId::random());
        let err = store.upsert_edge(&mut edge).unwrap_err();
        assert!(matches!(err, Error::UnknownEndpoint { .. }));
        assert_eq!(store.edge_count(), 0);

        let mut edge = Edge::new(LinkId::random(), known.id);
        assert!(store.upsert_edge(&mut edge).is_err());
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn upsert_edge_dedups_by_endpoint_pair() {
        let store = InMemoryGraph::new();
        let a = upsert(&store, "http://a", Utc::now());
        let b = upsert(&store, "http://b", Utc::now());

        let mut first = Edge::new(a.id, b.id);
        store.upsert_edge(&mut first).unwrap();
        let mut second = Edge::new(a.id, b.id);
        store.upsert_edge(&mut second).unwrap();

        assert_eq!(first.id, second.id);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(store.edge_count(), 1);

        // Reverse direction is a distinct pair.
        let mut reverse = Edge::new(b.id, a.id);
        store.upsert_edge(&mut reverse).unwrap();
        assert_ne!(reverse.id, first.id);
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn links_scan_range_is_half_open() {
        let store = InMemoryGraph::new();
        let t = Utc::now();
        let mut ids: Vec<LinkId> = (0..3)
            .map(|i| upsert(&store, &format!("http://{i}"), t).id)
            .collect();
        ids.sort_by_key(|id| id.to_string());

        let got: HashSet<LinkId> = collect_links(store.links(ids[0], ids[2], far_future()).unwrap())
            .into_iter()
            .map(|l| l.id)
            .collect();

        // Lower bound included, upper bound excluded.
        assert_eq!(got, HashSet::from([ids[0], ids[1]]));
    }

    #[test]
    fn links_scan_time_filter_is_strict() {
        let store = InMemoryGraph::new();
        let t = Utc::now();
        let old = upsert(&store, "http://old", t - Duration::minutes(1));
        let boundary = upsert(&store, "http://boundary", t);
        let fresh = upsert(&store, "http://fresh", t + Duration::minutes(1));

        let got: HashSet<LinkId> =
            collect_links(store.links(LinkId::nil(), LinkId::max(), t).unwrap())
                .into_iter()
                .map(|l| l.id)
                .collect();

        assert!(got.contains(&old.id));
        assert!(!got.contains(&boundary.id));
        assert!(!got.contains(&fresh.id));
    }

    #[test]
    fn links_scan_is_snapshot_isolated() {
        let store = InMemoryGraph::new();
        upsert(&store, "http://a", Utc::now());

        let iter = store
            .links(LinkId::nil(), LinkId::max(), far_future())
            .unwrap();
        upsert(&store, "http://b", Utc::now());

        assert_eq!(collect_links(iter).len(), 1);
    }

    #[test]
    fn edges_scan_filters_by_source_range() {
        let store = InMemoryGraph::new();
        let t = Utc::now();
        let mut src_ids: Vec<LinkId> = (0..2)
            .map(|i| upsert(&store, &format!("http://src/{i}"), t).id)
            .collect();
        src_ids.sort_by_key(|id| id.to_string());
        let dst = upsert(&store, "http://dst", t);

        for src in &src_ids {
            let mut edge = Edge::new(*src, dst.id);
            store.upsert_edge(&mut edge).unwrap();
        }

        // Range covering only the lower source.
        let got = collect_edges(
            store
                .edges(src_ids[0], successor(src_ids[0]), far_future())
                .unwrap(),
        );
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].src, src_ids[0]);
    }

    #[test]
    fn remove_stale_edges_is_scoped() {
        let store = InMemoryGraph::new();
        let t = Utc::now();
        let a = upsert(&store, "http://a", t);
        let b = upsert(&store, "http://b", t);
        let c = upsert(&store, "http://c", t);

        let mut a_to_b = Edge::new(a.id, b.id);
        store.upsert_edge(&mut a_to_b).unwrap();
        let mut c_to_b = Edge::new(c.id, b.id);
        store.upsert_edge(&mut c_to_b).unwrap();
        let cutoff = Utc::now();
        let mut a_to_c = Edge::new(a.id, c.id);
        store.upsert_edge(&mut a_to_c).unwrap();

        // Only a's edges older than the cutoff go away; c's edge and the
        // fresher a edge survive.
        store.remove_stale_edges(a.id, cutoff).unwrap();

        let survivors: HashSet<EdgeId> = collect_edges(
            store
                .edges(LinkId::nil(), LinkId::max(), far_future())
                .unwrap(),
        )
        .into_iter()
        .map(|e| e.id)
        .collect();
        assert_eq!(survivors, HashSet::from([c_to_b.id, a_to_c.id]));
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn remove_stale_edges_without_outgoing_edges_is_noop() {
        let store = InMemoryGraph::new();
        let a = upsert(&store, "http://a", Utc::now());
        assert!(store.remove_stale_edges(a.id, far_future()).is_ok());
    }

    #[test]
    fn iterator_current_returns_defensive_copy() {
        let store = InMemoryGraph::new();
        let link = upsert(&store, "http://a", Utc::now());

        let mut iter = store
            .links(LinkId::nil(), LinkId::max(), far_future())
            .unwrap();
        assert!(iter.advance());
        let mut copy = iter.current().unwrap();
        copy.url = "http://mangled".to_owned();

        assert_eq!(store.find_link(link.id).unwrap().url, "http://a");
    }

    #[test]
    fn crawl_pass_scenario() {
        let store = InMemoryGraph::new();
        let now = Utc::now();
        let l1 = upsert(&store, "http://a", now);
        let l2 = upsert(&store, "http://b", now);

        let mut edge = Edge::new(l1.id, l2.id);
        store.upsert_edge(&mut edge).unwrap();

        let got = collect_edges(
            store
                .edges(l1.id, successor(l1.id), now + Duration::seconds(1))
                .unwrap(),
        );
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].src, l1.id);
        assert_eq!(got[0].dst, l2.id);

        let mut refreshed = Edge::new(l1.id, l2.id);
        store.upsert_edge(&mut refreshed).unwrap();
        assert_eq!(refreshed.id, edge.id);
        assert!(refreshed.updated_at >= edge.updated_at);
        assert_eq!(store.edge_count(), 1);

        store
            .remove_stale_edges(l1.id, now + Duration::seconds(10))
            .unwrap();
        let got = collect_edges(
            store
                .edges(l1.id, successor(l1.id), far_future())
                .unwrap(),
        );
        assert!(got.is_empty());
        assert_eq!(store.edge_count(), 0);
    }
}
