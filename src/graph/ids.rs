//! Identifier types for graph entities.
//!
//! Links and edges carry 128-bit random identifiers. The canonical hyphenated
//! string form of an identifier doubles as the range-partition key for bulk
//! scans: shards are half-open intervals over that string ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a [`Link`](crate::graph::Link).
///
/// The nil value marks a link whose identity has not been assigned yet; the
/// store resolves it on upsert.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkId(Uuid);

/// Unique identifier for an [`Edge`](crate::graph::Edge).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(Uuid);

impl LinkId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        LinkId(Uuid::new_v4())
    }

    /// The nil (all-zero) identifier, used for not-yet-assigned links and as
    /// the lowest possible scan bound.
    pub const fn nil() -> Self {
        LinkId(Uuid::nil())
    }

    /// The all-ones identifier. Useful as the exclusive upper bound of a scan
    /// covering the whole keyspace.
    pub const fn max() -> Self {
        LinkId(Uuid::max())
    }

    /// Whether this is the nil identifier.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        LinkId(uuid)
    }

    /// The underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl EdgeId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        EdgeId(Uuid::new_v4())
    }

    /// The nil (all-zero) identifier, used for not-yet-assigned edges.
    pub const fn nil() -> Self {
        EdgeId(Uuid::nil())
    }

    /// Whether this is the nil identifier.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        EdgeId(uuid)
    }

    /// The underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LinkId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(LinkId)
    }
}

impl FromStr for EdgeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(EdgeId)
    }
}
