//! Catalog error types.

use thiserror::Error;

use edubuddy_store::StoreError;
use edubuddy_types::{Facet, MaterialKind};

use crate::link::LinkRejection;

/// Errors produced while turning a facet selection into a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A facet required by the kind was not selected
    #[error("Missing {facets:?} for {kind}")]
    MissingFacet {
        kind: MaterialKind,
        facets: Vec<Facet>,
    },

    /// Department code outside the lookup table
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// A facet value that cannot be used (bad semester number, exam type)
    #[error("Invalid {facet}: {value}")]
    InvalidFacet { facet: Facet, value: String },

    /// The facet or listing does not exist for this kind
    #[error("{facet} is not used for {kind}")]
    NotApplicable { kind: MaterialKind, facet: Facet },
}

impl ResolveError {
    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ResolveError::MissingFacet { kind, facets } => {
                if facets.contains(&Facet::Department) || facets.contains(&Facet::Semester) {
                    return "Please select Department and Semester.".to_string();
                }
                match kind {
                    MaterialKind::PdfNotes => {
                        "Please select Subject and Unit for PDF Notes.".to_string()
                    }
                    MaterialKind::Pyqs => {
                        "Please select Subject and Exam Type for PYQs.".to_string()
                    }
                    MaterialKind::Syllabus => "Please select Department and Semester.".to_string(),
                }
            }
            ResolveError::UnknownDepartment(_) => "Invalid department selection.".to_string(),
            ResolveError::InvalidFacet { facet, value } => {
                format!("Invalid {} selection: {}", facet, value)
            }
            ResolveError::NotApplicable { kind, facet } => {
                format!("{} is not available for {}.", facet, kind)
            }
        }
    }
}

/// User-triggered action, used to pick failure wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialAction {
    LoadSubjects,
    LoadUnits,
    FetchMaterial,
}

/// Errors from a material action.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Read succeeded but the node or link is absent
    #[error("Material not found at {path}")]
    NotFound { path: String },

    /// Read succeeded but the value is not a usable link
    #[error("Invalid material link at {path}: {reason}")]
    InvalidLink { path: String, reason: LinkRejection },

    /// Network/service failure; safe to retry
    #[error("Failed to read {path}: {source}")]
    RemoteReadFailure {
        path: String,
        #[source]
        source: StoreError,
    },

    /// The triggering control already has a read in flight
    #[error("{0} is busy")]
    Busy(&'static str),
}

impl MaterialError {
    /// Whether the outcome is "material not found" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MaterialError::NotFound { .. } | MaterialError::InvalidLink { .. }
        )
    }

    /// Whether re-issuing the action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MaterialError::RemoteReadFailure { .. } | MaterialError::Busy(_)
        )
    }

    /// Message shown to the user for the given action.
    pub fn user_message(&self, action: MaterialAction) -> String {
        match self {
            MaterialError::Resolve(e) => e.user_message(),
            MaterialError::NotFound { .. } => {
                "Material not found for the selected criteria.".to_string()
            }
            MaterialError::InvalidLink { .. } => {
                "Material link is empty, invalid, or not a valid URL.".to_string()
            }
            MaterialError::RemoteReadFailure { .. } => match action {
                MaterialAction::LoadSubjects => "Failed to load subjects.".to_string(),
                MaterialAction::LoadUnits => "Failed to load units.".to_string(),
                MaterialAction::FetchMaterial => {
                    "Failed to fetch material. Please try again.".to_string()
                }
            },
            MaterialError::Busy(_) => {
                "Please wait for the current request to finish.".to_string()
            }
        }
    }
}
