//! Slash-delimited addresses into the remote hierarchical store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path to a node in the store, kept as segments.
///
/// Segments may contain spaces (`Semester 1`, `PDF Notes`) but never `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoragePath {
    segments: Vec<String>,
}

impl StoragePath {
    /// The store root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a slash-joined path; empty segments are dropped.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Append one segment.
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// The path without its last segment, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl From<&str> for StoragePath {
    fn from(path: &str) -> Self {
        StoragePath::parse(path)
    }
}
