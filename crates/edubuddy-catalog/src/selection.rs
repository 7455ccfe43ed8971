//! Material popup state.
//!
//! Opening the popup for a kind starts from a blank selection. Changing the
//! department or semester clears subject and unit; changing the subject
//! clears the unit. Re-selecting the current value changes nothing. Facets a
//! kind does not use cannot be set.

use edubuddy_types::{Facet, MaterialKind, StoragePath};

use crate::error::ResolveError;
use crate::resolver::{self, FacetSelection, ResolvedPath};

/// Which dropdowns are shown for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleControls {
    pub subject: bool,
    pub unit: bool,
    pub exam_type: bool,
}

impl VisibleControls {
    pub fn for_kind(kind: MaterialKind) -> Self {
        Self {
            subject: kind.uses_subject(),
            unit: kind.uses_unit(),
            exam_type: kind.uses_exam_type(),
        }
    }
}

/// Store `value` in `slot`; true when it differs from what was there.
fn set_changed(slot: &mut Option<String>, value: String) -> bool {
    if slot.as_deref() == Some(value.as_str()) {
        return false;
    }
    *slot = Some(value);
    true
}

/// The facets chosen in one material popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialSelection {
    kind: MaterialKind,
    facets: FacetSelection,
}

impl MaterialSelection {
    /// Open a popup for `kind` with nothing selected.
    pub fn open(kind: MaterialKind) -> Self {
        Self {
            kind,
            facets: FacetSelection::default(),
        }
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    pub fn facets(&self) -> &FacetSelection {
        &self.facets
    }

    pub fn controls(&self) -> VisibleControls {
        VisibleControls::for_kind(self.kind)
    }

    /// Popup title, e.g. `Select PDF Notes`.
    pub fn title(&self) -> String {
        format!("Select {}", self.kind)
    }

    pub fn set_department(&mut self, code: impl Into<String>) {
        if set_changed(&mut self.facets.department, code.into()) {
            self.clear_subject();
        }
    }

    pub fn set_semester(&mut self, semester: impl Into<String>) {
        if set_changed(&mut self.facets.semester, semester.into()) {
            self.clear_subject();
        }
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> Result<(), ResolveError> {
        self.ensure(self.kind.uses_subject(), Facet::Subject)?;
        if set_changed(&mut self.facets.subject, subject.into()) {
            self.facets.unit = None;
        }
        Ok(())
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) -> Result<(), ResolveError> {
        self.ensure(self.kind.uses_unit(), Facet::Unit)?;
        self.facets.unit = Some(unit.into());
        Ok(())
    }

    pub fn set_exam_type(&mut self, exam_type: impl Into<String>) -> Result<(), ResolveError> {
        self.ensure(self.kind.uses_exam_type(), Facet::ExamType)?;
        self.facets.exam_type = Some(exam_type.into());
        Ok(())
    }

    /// Resolve the material address for the current facets.
    pub fn resolve(&self) -> Result<ResolvedPath, ResolveError> {
        resolver::resolve(self.kind, &self.facets)
    }

    pub fn subjects_path(&self) -> Result<StoragePath, ResolveError> {
        resolver::subjects_path(self.kind, &self.facets)
    }

    pub fn units_path(&self) -> Result<StoragePath, ResolveError> {
        resolver::units_path(self.kind, &self.facets)
    }

    fn clear_subject(&mut self) {
        self.facets.subject = None;
        self.facets.unit = None;
    }

    fn ensure(&self, used: bool, facet: Facet) -> Result<(), ResolveError> {
        if used {
            Ok(())
        } else {
            Err(ResolveError::NotApplicable {
                kind: self.kind,
                facet,
            })
        }
    }
}
