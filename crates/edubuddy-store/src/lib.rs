//! # edubuddy-store
//!
//! Read-once access to the hierarchical materials store.
//!
//! The store is an external JSON tree addressed by slash-delimited paths
//! (`PDF Notes/Department/IT/Semester 1/...`). This crate provides:
//! - `StoreNode`: a typed view of any node (branch or scalar leaf)
//! - `MaterialStore`: the async read seam used by the catalog and search crates
//! - `RtdbStore`: REST client for the realtime database
//! - `MemoryStore`: in-process store over a JSON export, for tests and offline use
//!
//! No writes, subscriptions or transactions are exposed.

pub mod error;
pub mod memory;
pub mod node;
pub mod rtdb;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use node::StoreNode;
pub use rtdb::{RtdbConfig, RtdbStore};
pub use store::MaterialStore;
