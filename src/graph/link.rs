//! Link (URL node) type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LinkId;

/// A discovered URL in the crawl graph.
///
/// The URL is the business key: the store keeps at most one link per distinct
/// URL. A nil `id` means the link has not been through the store yet; upsert
/// resolves it to the stored identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Unique identifier, assigned by the store.
    pub id: LinkId,
    /// The URL this link points to. Unique across the graph.
    pub url: String,
    /// Time of the last successful fetch of this URL.
    pub retrieved_at: DateTime<Utc>,
}

impl Link {
    /// Create a link with an unassigned identity.
    pub fn new(url: impl Into<String>, retrieved_at: DateTime<Utc>) -> Self {
        Self {
            id: LinkId::nil(),
            url: url.into(),
            retrieved_at,
        }
    }
}
