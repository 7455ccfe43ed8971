//! Material kinds and the facets that narrow a material query.
//!
//! A `MaterialKind` decides three things: which facets are required,
//! which root sub-tree of the store holds the material, and which field
//! of the addressed node carries the link.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Kind of study material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    #[serde(rename = "PDF Notes")]
    PdfNotes,
    #[serde(rename = "PYQs")]
    Pyqs,
    #[serde(rename = "Syllabus")]
    Syllabus,
}

impl MaterialKind {
    /// Every kind, in the order the search flattener walks them.
    pub const ALL: [MaterialKind; 3] = [
        MaterialKind::PdfNotes,
        MaterialKind::Pyqs,
        MaterialKind::Syllabus,
    ];

    /// Human-readable name, also the first term of a record's search key.
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialKind::PdfNotes => "PDF Notes",
            MaterialKind::Pyqs => "PYQs",
            MaterialKind::Syllabus => "Syllabus",
        }
    }

    /// First segment of every storage path for this kind.
    pub fn store_root(&self) -> &'static str {
        match self {
            MaterialKind::PdfNotes => "PDF Notes",
            MaterialKind::Pyqs => "PYQ",
            MaterialKind::Syllabus => "Syllabus Structure",
        }
    }

    /// Field holding the material link at a resolved node.
    pub fn link_field(&self) -> LinkField {
        match self {
            MaterialKind::PdfNotes => LinkField::PdfLink,
            MaterialKind::Pyqs => LinkField::PyqLink,
            MaterialKind::Syllabus => LinkField::SyllabusStructure,
        }
    }

    /// Trailing intent words appended to each record's search key.
    pub fn search_keyword(&self) -> &'static str {
        match self {
            MaterialKind::PdfNotes => "pdf notes",
            MaterialKind::Pyqs => "pyq previous year question paper",
            MaterialKind::Syllabus => "syllabus",
        }
    }

    /// Whether the subject dropdown is shown for this kind.
    pub fn uses_subject(&self) -> bool {
        !matches!(self, MaterialKind::Syllabus)
    }

    /// Whether the unit dropdown is shown for this kind.
    pub fn uses_unit(&self) -> bool {
        matches!(self, MaterialKind::PdfNotes)
    }

    /// Whether the exam-type dropdown is shown for this kind.
    pub fn uses_exam_type(&self) -> bool {
        matches!(self, MaterialKind::Pyqs)
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MaterialKind {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" | "pdf notes" | "pdf-notes" | "notes" => Ok(MaterialKind::PdfNotes),
            "pyq" | "pyqs" => Ok(MaterialKind::Pyqs),
            "syllabus" | "syllabus structure" => Ok(MaterialKind::Syllabus),
            other => Err(PortalError::InvalidInput(format!(
                "unknown material kind: {other}"
            ))),
        }
    }
}

/// Name of the field that carries a material link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkField {
    #[serde(rename = "getPDFlink")]
    PdfLink,
    #[serde(rename = "getPYQlink")]
    PyqLink,
    #[serde(rename = "Get Syllabus Structure")]
    SyllabusStructure,
}

impl LinkField {
    /// Exact key in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkField::PdfLink => "getPDFlink",
            LinkField::PyqLink => "getPYQlink",
            LinkField::SyllabusStructure => "Get Syllabus Structure",
        }
    }
}

impl fmt::Display for LinkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exam type for previous-year question papers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    Insem,
    Endsem,
}

impl ExamType {
    /// Parse the UI value (`insem` / `endsem`), case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "insem" => Some(ExamType::Insem),
            "endsem" => Some(ExamType::Endsem),
            _ => None,
        }
    }

    /// Key used in storage paths: the UI value with its first letter upper-cased.
    pub fn storage_key(&self) -> &'static str {
        match self {
            ExamType::Insem => "Insem",
            ExamType::Endsem => "Endsem",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// Semester as selected: positive integer text, kept verbatim for paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Semester(String);

impl Semester {
    /// Literal prefix of semester keys in the store.
    pub const KEY_PREFIX: &'static str = "Semester ";

    /// Parse the UI value. Surrounding whitespace is dropped, the digits are not rewritten.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let number = raw.parse::<u32>().ok()?;
        (number > 0 && raw.bytes().all(|b| b.is_ascii_digit())).then(|| Semester(raw.to_string()))
    }

    pub fn number(&self) -> u32 {
        self.0.parse().unwrap_or_default()
    }

    /// Key used in storage paths, e.g. `Semester 1`.
    pub fn storage_key(&self) -> String {
        format!("{}{}", Self::KEY_PREFIX, self.0)
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single user-selected dimension of a material query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Department,
    Semester,
    Subject,
    Unit,
    ExamType,
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::Department => write!(f, "Department"),
            Facet::Semester => write!(f, "Semester"),
            Facet::Subject => write!(f, "Subject"),
            Facet::Unit => write!(f, "Unit"),
            Facet::ExamType => write!(f, "Exam Type"),
        }
    }
}
