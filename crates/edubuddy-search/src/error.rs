//! Search error types.

use thiserror::Error;

use edubuddy_store::StoreError;
use edubuddy_types::MaterialKind;

/// Errors that can occur while building the search index.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Reading a kind root failed
    #[error("Failed to read {kind} root: {source}")]
    RootRead {
        kind: MaterialKind,
        #[source]
        source: StoreError,
    },
}
