//! Core foundations: error handling and configuration.

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::StoreConfig;
pub use error::{Error, Result};
