//! Graph entities and the store contract.
//!
//! This module defines the link and edge value types, their identifiers, the
//! cursor protocol for range scans, and the [`Graph`] trait every storage
//! backend implements. Callers program against the trait only, which is what
//! lets an in-memory store (tests, small crawls) and a persistent store
//! (production) swap without touching crawler or scheduler code.

pub mod edge;
pub mod ids;
pub mod iter;
pub mod link;

pub use edge::Edge;
pub use ids::{EdgeId, LinkId};
pub use iter::{Cursor, EdgeIterator, LinkIterator, SnapshotIter};
pub use link::Link;

use chrono::{DateTime, Utc};

use crate::core::error::Result;

/// Operations every link-graph backend must provide.
///
/// All six operations share the same invariants across backends: links are
/// idempotently upserted by URL, edges by `(src, dst)` pair with endpoint
/// validation, and both scans cover the half-open identifier range
/// `[from, to)` (compared by canonical string form) intersected with a strict
/// timestamp upper bound.
pub trait Graph: Send + Sync {
    /// Insert the link or refresh the existing link with the same URL.
    ///
    /// On return `link.id` holds the resolved identifier and
    /// `link.retrieved_at` the stored timestamp, which only ever advances:
    /// refreshing with an older timestamp keeps the stored one.
    fn upsert_link(&self, link: &mut Link) -> Result<()>;

    /// Look up a link by identifier. Returns a copy, or
    /// [`Error::NotFound`](crate::core::error::Error::NotFound).
    fn find_link(&self, id: LinkId) -> Result<Link>;

    /// Insert the edge or refresh the existing edge with the same
    /// `(src, dst)` pair, bumping its `updated_at` to now.
    ///
    /// Both endpoints must already exist as links; otherwise
    /// [`Error::UnknownEndpoint`](crate::core::error::Error::UnknownEndpoint)
    /// is returned and nothing is stored. On success the caller's `edge`
    /// carries the resolved identity and refreshed timestamp.
    fn upsert_edge(&self, edge: &mut Edge) -> Result<()>;

    /// Delete every edge originating from `from` whose `updated_at` is
    /// strictly before `updated_before`. Succeeds as a no-op when `from` has
    /// no outgoing edges.
    fn remove_stale_edges(&self, from: LinkId, updated_before: DateTime<Utc>) -> Result<()>;

    /// Scan links whose identifier falls in `[from, to)` and whose
    /// `retrieved_at` is strictly before `retrieved_before`.
    fn links(
        &self,
        from: LinkId,
        to: LinkId,
        retrieved_before: DateTime<Utc>,
    ) -> Result<LinkIterator>;

    /// Scan edges whose *source link's* identifier falls in `[from, to)` and
    /// whose `updated_at` is strictly before `updated_before`.
    fn edges(&self, from: LinkId, to: LinkId, updated_before: DateTime<Utc>)
        -> Result<EdgeIterator>;
}
