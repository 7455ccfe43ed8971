//! In-process store over a JSON export.
//!
//! Useful for tests and for browsing a downloaded copy of the database
//! without network access.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use edubuddy_types::StoragePath;

use crate::error::StoreError;
use crate::node::StoreNode;
use crate::store::MaterialStore;

/// Store backed by an in-memory `StoreNode` tree.
#[derive(Debug, Default)]
pub struct MemoryStore {
    root: Option<StoreNode>,
    failing: Vec<StoragePath>,
}

impl MemoryStore {
    /// Create a store with the given root node.
    pub fn new(root: StoreNode) -> Self {
        Self {
            root: Some(root),
            failing: Vec::new(),
        }
    }

    /// Create a store with no data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a store from a JSON value (`null` gives an empty store).
    pub fn from_json(value: serde_json::Value) -> Self {
        Self {
            root: StoreNode::from_json(value),
            failing: Vec::new(),
        }
    }

    /// Load a JSON export of the whole database.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| StoreError::Decode(e.to_string()))?;
        debug!(path = %path.as_ref().display(), "Loaded store export");
        Ok(Self::from_json(value))
    }

    /// Make every read at or below `path` fail with `StoreError::Unavailable`.
    pub fn with_failing_path(mut self, path: impl Into<StoragePath>) -> Self {
        self.failing.push(path.into());
        self
    }

    fn is_failing(&self, path: &StoragePath) -> bool {
        self.failing
            .iter()
            .any(|prefix| path.segments().starts_with(prefix.segments()))
    }
}

#[async_trait]
impl MaterialStore for MemoryStore {
    async fn get(&self, path: &StoragePath) -> Result<Option<StoreNode>, StoreError> {
        if self.is_failing(path) {
            return Err(StoreError::Unavailable(path.to_string()));
        }
        Ok(self.root.as_ref().and_then(|root| root.at(path)).cloned())
    }
}
