//! # edubuddy-types
//!
//! Shared domain types for the EduBuddy materials client.
//!
//! This crate defines the vocabulary every other crate speaks:
//! - Departments and their storage keys
//! - Material kinds, exam types, link fields and facets
//! - Storage paths into the remote hierarchical store
//! - Searchable records produced by the flattener
//! - User notices
//! - Settings: layered configuration
//!
//! ## Usage
//!
//! ```rust
//! use edubuddy_types::{Department, MaterialKind};
//!
//! let dept: Department = "it".parse().unwrap();
//! assert_eq!(dept.storage_key(), "IT");
//! assert_eq!(MaterialKind::PdfNotes.link_field().as_str(), "getPDFlink");
//! ```

pub mod config;
pub mod department;
pub mod error;
pub mod material;
pub mod notice;
pub mod path;
pub mod record;

pub use config::{DatabaseSettings, IdentitySettings, SearchSettings, Settings};
pub use department::Department;
pub use error::PortalError;
pub use material::{ExamType, Facet, LinkField, MaterialKind, Semester};
pub use notice::{Notice, NoticeLevel};
pub use path::StoragePath;
pub use record::SearchRecord;
