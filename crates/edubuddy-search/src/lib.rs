//! # edubuddy-search
//!
//! Keyword search over every material in the store.
//!
//! On load the three kind roots (`PDF Notes/Department`, `PYQ/Department`,
//! `Syllabus Structure/Department`) are read and flattened into
//! `SearchRecord`s, each carrying a precomputed lowercase search key.
//! Queries are case-insensitive substring matches over that key; results
//! keep traversal order and are never ranked.
//!
//! ## Modules
//! - `leaf`: per-kind leaf predicates (pure, independently testable)
//! - `flatten`: recursive walk of a kind root into records
//! - `index`: the cached record list, refresh and query

pub mod error;
pub mod flatten;
pub mod index;
pub mod leaf;

pub use error::SearchError;
pub use flatten::{flatten_root, flatten_store, FlattenOptions};
pub use index::{RefreshReport, RootFailure, SearchIndex, SearchView};
pub use leaf::{exam_leaf, syllabus_leaf, unit_leaf, LeafLink, SkipReason, UnitLeaf};
