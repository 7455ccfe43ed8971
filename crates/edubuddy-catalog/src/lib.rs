//! # edubuddy-catalog
//!
//! Turns facet selections into store paths and material links.
//!
//! ## Components
//! - `resolver`: fixed per-kind path rules (material node, subjects listing, units listing)
//! - `selection`: popup state with dependent-facet invalidation
//! - `link`: acceptance rule for fetched links
//! - `guard`: disables a control while its read is in flight
//! - `browser`: the user-triggered actions (list subjects, list units, fetch link)
//!
//! The material kind is always an explicit argument; there is no ambient
//! "current kind" state outside a `MaterialSelection`.

pub mod browser;
pub mod error;
pub mod guard;
pub mod link;
pub mod resolver;
pub mod selection;

pub use browser::{MaterialBrowser, UnitOption};
pub use error::{MaterialAction, MaterialError, ResolveError};
pub use guard::{Control, ControlGuard};
pub use link::{validate_link, LinkRejection, MaterialLink};
pub use resolver::{resolve, subjects_path, units_path, FacetSelection, ResolvedPath};
pub use selection::{MaterialSelection, VisibleControls};
