//! Acceptance rule for fetched material links.

use std::fmt;

use serde::{Deserialize, Serialize};

use edubuddy_store::StoreNode;

/// A link that passed validation: a non-empty string starting with `http`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialLink(String);

impl MaterialLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MaterialLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a fetched value was not accepted as a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRejection {
    /// No value at the link field
    Missing,
    /// Value is a branch, number or boolean
    NotText,
    /// Empty or whitespace-only string
    Empty,
    /// String that does not start with `http`
    BadScheme,
}

impl fmt::Display for LinkRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkRejection::Missing => write!(f, "no value"),
            LinkRejection::NotText => write!(f, "value is not a string"),
            LinkRejection::Empty => write!(f, "empty string"),
            LinkRejection::BadScheme => write!(f, "not an http(s) URL"),
        }
    }
}

/// Validate the value read from a link field.
pub fn validate_link(value: Option<&StoreNode>) -> Result<MaterialLink, LinkRejection> {
    let node = value.ok_or(LinkRejection::Missing)?;
    let text = node.as_text().ok_or(LinkRejection::NotText)?;
    if text.trim().is_empty() {
        return Err(LinkRejection::Empty);
    }
    if !text.starts_with("http") {
        return Err(LinkRejection::BadScheme);
    }
    Ok(MaterialLink(text.to_string()))
}
