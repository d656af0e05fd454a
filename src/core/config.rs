//! Configuration for the link graph store.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Sizing knobs for the in-memory store.
///
/// The defaults suit small to medium crawls. Raise the capacities when the
/// expected graph size is known upfront to avoid early map reallocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Initial capacity of the link map and URL index.
    pub initial_link_capacity: usize,

    /// Initial capacity of the edge map.
    pub initial_edge_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_link_capacity: 1024,
            initial_edge_capacity: 4096,
        }
    }
}

impl StoreConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
