//! The read seam between material logic and the remote store.

use std::sync::Arc;

use async_trait::async_trait;

use edubuddy_types::StoragePath;

use crate::error::StoreError;
use crate::node::StoreNode;

/// Read-once access to nodes of the hierarchical store.
///
/// `Ok(None)` means the node does not exist. Implementations must not
/// retry forever; a hung read hangs the caller.
#[async_trait]
pub trait MaterialStore: Send + Sync {
    /// Fetch the node at `path` (the empty path is the store root).
    async fn get(&self, path: &StoragePath) -> Result<Option<StoreNode>, StoreError>;
}

#[async_trait]
impl<T: MaterialStore + ?Sized> MaterialStore for Arc<T> {
    async fn get(&self, path: &StoragePath) -> Result<Option<StoreNode>, StoreError> {
        (**self).get(path).await
    }
}

#[async_trait]
impl<T: MaterialStore + ?Sized> MaterialStore for Box<T> {
    async fn get(&self, path: &StoragePath) -> Result<Option<StoreNode>, StoreError> {
        (**self).get(path).await
    }
}
