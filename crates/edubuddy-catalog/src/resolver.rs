//! Per-kind storage path rules.
//!
//! ```text
//! PDF Notes:  PDF Notes/Department/<dept>/Semester <n>/Subjects/<subject>/<unit>      getPDFlink
//! PYQs:       PYQ/Department/<dept>/Semester <n>/Subjects/<subject>/<Insem|Endsem>    getPYQlink
//! Syllabus:   Syllabus Structure/Department/<dept>/Semester <n>                       Get Syllabus Structure
//! ```
//!
//! Facets are validated before any path is built, so a returned path never
//! contains an empty or unresolved segment.

use serde::{Deserialize, Serialize};

use edubuddy_types::{Department, ExamType, Facet, LinkField, MaterialKind, Semester, StoragePath};

use crate::error::ResolveError;

/// Key of the subjects mapping below each semester node.
pub const SUBJECTS_KEY: &str = "Subjects";

/// Raw facet values as selected in the UI. Empty strings count as unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSelection {
    pub department: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    pub unit: Option<String>,
    pub exam_type: Option<String>,
}

impl FacetSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department(mut self, code: impl Into<String>) -> Self {
        self.department = Some(code.into());
        self
    }

    pub fn with_semester(mut self, semester: impl Into<String>) -> Self {
        self.semester = Some(semester.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_exam_type(mut self, exam_type: impl Into<String>) -> Self {
        self.exam_type = Some(exam_type.into());
        self
    }
}

fn selected(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// A resolved material address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub kind: MaterialKind,
    /// Node holding the link field
    pub node_path: StoragePath,
    pub link_field: LinkField,
}

impl ResolvedPath {
    /// Path of the link value itself (`<node_path>/<link_field>`).
    pub fn link_path(&self) -> StoragePath {
        self.node_path.clone().child(self.link_field.as_str())
    }
}

/// Department and semester resolved from a selection.
struct SemesterScope {
    department: Department,
    semester: Semester,
}

impl SemesterScope {
    fn path(&self, kind: MaterialKind) -> StoragePath {
        StoragePath::root()
            .child(kind.store_root())
            .child("Department")
            .child(self.department.storage_key())
            .child(self.semester.storage_key())
    }
}

fn resolve_scope(kind: MaterialKind, sel: &FacetSelection) -> Result<SemesterScope, ResolveError> {
    let department = selected(&sel.department);
    let semester = selected(&sel.semester);

    let mut missing = Vec::new();
    if department.is_none() {
        missing.push(Facet::Department);
    }
    if semester.is_none() {
        missing.push(Facet::Semester);
    }
    let (Some(department), Some(semester)) = (department, semester) else {
        return Err(ResolveError::MissingFacet {
            kind,
            facets: missing,
        });
    };

    let department = Department::from_code(department)
        .ok_or_else(|| ResolveError::UnknownDepartment(department.to_string()))?;
    let semester = Semester::parse(semester).ok_or_else(|| ResolveError::InvalidFacet {
        facet: Facet::Semester,
        value: semester.to_string(),
    })?;

    Ok(SemesterScope {
        department,
        semester,
    })
}

fn require<'a>(
    kind: MaterialKind,
    facets: &[(Facet, &'a Option<String>)],
) -> Result<Vec<&'a str>, ResolveError> {
    let missing: Vec<Facet> = facets
        .iter()
        .filter(|(_, value)| selected(value).is_none())
        .map(|(facet, _)| *facet)
        .collect();
    if !missing.is_empty() {
        return Err(ResolveError::MissingFacet {
            kind,
            facets: missing,
        });
    }
    Ok(facets
        .iter()
        .filter_map(|(_, value)| selected(value))
        .collect())
}

/// Resolve the node and link field addressed by a selection.
pub fn resolve(kind: MaterialKind, sel: &FacetSelection) -> Result<ResolvedPath, ResolveError> {
    let scope = resolve_scope(kind, sel)?;

    let node_path = match kind {
        MaterialKind::PdfNotes => {
            let values = require(
                kind,
                &[(Facet::Subject, &sel.subject), (Facet::Unit, &sel.unit)],
            )?;
            scope
                .path(kind)
                .child(SUBJECTS_KEY)
                .child(values[0])
                .child(values[1])
        }
        MaterialKind::Pyqs => {
            let values = require(
                kind,
                &[
                    (Facet::Subject, &sel.subject),
                    (Facet::ExamType, &sel.exam_type),
                ],
            )?;
            let exam = ExamType::parse(values[1]).ok_or_else(|| ResolveError::InvalidFacet {
                facet: Facet::ExamType,
                value: values[1].to_string(),
            })?;
            scope
                .path(kind)
                .child(SUBJECTS_KEY)
                .child(values[0])
                .child(exam.storage_key())
        }
        MaterialKind::Syllabus => scope.path(kind),
    };

    Ok(ResolvedPath {
        kind,
        node_path,
        link_field: kind.link_field(),
    })
}

/// Path listing the subjects for a department and semester.
///
/// Syllabus has no subject control, so it has no subjects listing.
pub fn subjects_path(kind: MaterialKind, sel: &FacetSelection) -> Result<StoragePath, ResolveError> {
    if !kind.uses_subject() {
        return Err(ResolveError::NotApplicable {
            kind,
            facet: Facet::Subject,
        });
    }
    let scope = resolve_scope(kind, sel)?;
    Ok(scope.path(kind).child(SUBJECTS_KEY))
}

/// Path listing the units of a subject. PDF Notes only.
pub fn units_path(kind: MaterialKind, sel: &FacetSelection) -> Result<StoragePath, ResolveError> {
    if !kind.uses_unit() {
        return Err(ResolveError::NotApplicable {
            kind,
            facet: Facet::Unit,
        });
    }
    let subjects = subjects_path(kind, sel)?;
    let values = require(kind, &[(Facet::Subject, &sel.subject)])?;
    Ok(subjects.child(values[0]))
}
