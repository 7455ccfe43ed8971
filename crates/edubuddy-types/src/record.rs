//! Searchable records produced by flattening the store.

use serde::{Deserialize, Serialize};

use crate::material::MaterialKind;

/// One addressable material leaf, pre-indexed for substring search.
///
/// Built once per index refresh and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    #[serde(rename = "type")]
    pub kind: MaterialKind,

    /// Department key as found in the store (e.g. `IT`)
    pub department: String,

    /// Semester key with the `Semester ` prefix stripped
    pub semester: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Full unit name from the node's `Name` field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,

    /// Unit key, e.g. `Unit I`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<String>,

    /// Human-readable title shown in result lists
    pub name: String,

    pub link: String,

    /// Breadcrumb trail, e.g. `IT > Semester 1 > Data Structures`
    pub path_display: String,

    /// Lowercase concatenation of every term above plus the kind keyword
    pub search_text: String,
}

impl SearchRecord {
    /// Substring match against the search key. `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.search_text.contains(needle)
    }
}
