//! Link Graph - A concurrent graph store for web-link crawlers
//!
//! Nodes are discovered URLs ("links"), edges are directed "link A references
//! link B" relationships observed at a point in time. Concurrent writers
//! append newly discovered links and edges while concurrent readers stream
//! UUID-partitioned ranges of the graph for downstream processing such as
//! re-crawl scheduling or PageRank-style computation.
#![warn(missing_docs)]

// Core foundational modules
pub mod core;

// Main functional modules
pub mod graph;
pub mod storage;

// Re-export commonly used items for convenience
pub use crate::core::{Error, Result, StoreConfig};
pub use graph::{Cursor, Edge, EdgeId, EdgeIterator, Graph, Link, LinkId, LinkIterator};
pub use storage::InMemoryGraph;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize tracing for binaries embedding the store.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Initializing {} v{}", NAME, VERSION);
    Ok(())
}
