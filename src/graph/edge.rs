//! Edge (directed reference) type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EdgeId, LinkId};

/// A directed "src references dst" relationship between two links.
///
/// Edges are unique per ordered `(src, dst)` pair. Re-observing a pair
/// refreshes `updated_at` on the stored edge instead of creating a duplicate,
/// which is what lets stale-edge pruning detect references that disappeared
/// between crawl passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier, assigned by the store.
    pub id: EdgeId,
    /// Source link of the reference.
    pub src: LinkId,
    /// Destination link of the reference.
    pub dst: LinkId,
    /// Time this edge was last observed. Set by the store on every upsert.
    pub updated_at: DateTime<Utc>,
}

impl Edge {
    /// Create an edge with an unassigned identity between two resolved links.
    pub fn new(src: LinkId, dst: LinkId) -> Self {
        Self {
            id: EdgeId::nil(),
            src,
            dst,
            updated_at: Utc::now(),
        }
    }
}
