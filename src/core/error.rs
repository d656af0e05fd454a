//! Error types for the link graph store.

use thiserror::Error;

use crate::graph::LinkId;

/// Main result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by graph store operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No link exists with the requested identifier.
    #[error("link not found: {0}")]
    NotFound(LinkId),

    /// An edge referenced a source or destination link that does not exist.
    #[error("unknown edge endpoint: src {src}, dst {dst}")]
    UnknownEndpoint {
        /// Source link identifier the edge referenced.
        src: LinkId,
        /// Destination link identifier the edge referenced.
        dst: LinkId,
    },

    /// Configuration load or parse failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Backend storage fault. Never produced by the in-memory store; reserved
    /// for I/O-backed backends surfacing faults through cursor `error()`.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O errors from std.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
