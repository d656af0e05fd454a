//! Storage backends for the link graph.
//!
//! Backends implement the [`Graph`](crate::graph::Graph) trait and are
//! interchangeable behind it. This crate ships the in-memory backend; a
//! SQL-backed backend maps the same six operations onto statements enforcing
//! the same uniqueness invariants (unique `url`, unique `(src, dst)`) at the
//! storage level.

/// In-memory backend
pub mod memory;

// Re-export main storage types
pub use memory::InMemoryGraph;
