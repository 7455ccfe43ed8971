//! User-triggered material actions.
//!
//! Each action validates facets first, then disables its control for the
//! duration of the store read. Failures never escape as panics; they come
//! back as `MaterialError` for the caller to render.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use edubuddy_store::{MaterialStore, StoreNode};
use edubuddy_types::{MaterialKind, StoragePath};

use crate::error::MaterialError;
use crate::guard::{Control, ControlGuard};
use crate::link::{validate_link, LinkRejection, MaterialLink};
use crate::resolver::{self, FacetSelection};

/// An entry of the unit dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOption {
    /// Storage key, e.g. `Unit I`
    pub key: String,
    /// Full unit name from the node's `Name` field
    pub name: String,
}

/// Material actions over a store.
pub struct MaterialBrowser<S> {
    store: S,
    subjects_control: Control,
    units_control: Control,
    fetch_control: Control,
}

impl<S: MaterialStore> MaterialBrowser<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            subjects_control: Control::new("subject"),
            units_control: Control::new("unit"),
            fetch_control: Control::new("getMaterial"),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The "Get Material" button.
    pub fn fetch_control(&self) -> &Control {
        &self.fetch_control
    }

    pub fn subjects_control(&self) -> &Control {
        &self.subjects_control
    }

    pub fn units_control(&self) -> &Control {
        &self.units_control
    }

    /// Subject names for a department and semester, in store order.
    ///
    /// A missing listing node yields an empty list.
    pub async fn list_subjects(
        &self,
        kind: MaterialKind,
        sel: &FacetSelection,
    ) -> Result<Vec<String>, MaterialError> {
        let path = resolver::subjects_path(kind, sel)?;
        let _guard = acquire(&self.subjects_control)?;

        let node = self.read(&path).await?;
        let subjects = node.map(|n| n.keys()).unwrap_or_default();
        if subjects.is_empty() {
            info!(path = %path, "No subjects found");
        }
        Ok(subjects)
    }

    /// Units of a subject that carry a `Name`. PDF Notes only.
    pub async fn list_units(
        &self,
        kind: MaterialKind,
        sel: &FacetSelection,
    ) -> Result<Vec<UnitOption>, MaterialError> {
        let path = resolver::units_path(kind, sel)?;
        let _guard = acquire(&self.units_control)?;

        let Some(node) = self.read(&path).await? else {
            info!(path = %path, "No units found");
            return Ok(Vec::new());
        };

        Ok(node
            .children()
            .filter_map(|(key, unit)| {
                let name = unit.child("Name")?;
                Some(UnitOption {
                    key: key.to_string(),
                    name: display_text(name),
                })
            })
            .collect())
    }

    /// Fetch and validate the material link for a selection.
    pub async fn fetch_link(
        &self,
        kind: MaterialKind,
        sel: &FacetSelection,
    ) -> Result<MaterialLink, MaterialError> {
        let resolved = resolver::resolve(kind, sel)?;
        let _guard = acquire(&self.fetch_control)?;

        let link_path = resolved.link_path();
        let value = self.read(&link_path).await?;

        // Absent or falsy values are "not found"; truthy non-links are invalid.
        let value = value.filter(|v| v.is_branch() || v.truthy_text().is_some());
        match validate_link(value.as_ref()) {
            Ok(link) => {
                info!(path = %link_path, "Material link found");
                Ok(link)
            }
            Err(LinkRejection::Missing) => {
                info!(path = %link_path, "No data found");
                Err(MaterialError::NotFound {
                    path: link_path.to_string(),
                })
            }
            Err(reason) => {
                warn!(path = %link_path, reason = %reason, "Invalid link retrieved");
                Err(MaterialError::InvalidLink {
                    path: link_path.to_string(),
                    reason,
                })
            }
        }
    }

    async fn read(&self, path: &StoragePath) -> Result<Option<StoreNode>, MaterialError> {
        debug!(path = %path, "Reading");
        self.store
            .get(path)
            .await
            .map_err(|source| MaterialError::RemoteReadFailure {
                path: path.to_string(),
                source,
            })
    }
}

fn acquire(control: &Control) -> Result<ControlGuard, MaterialError> {
    control
        .try_acquire()
        .ok_or(MaterialError::Busy(control.name()))
}

fn display_text(node: &StoreNode) -> String {
    match node {
        StoreNode::Text(s) => s.clone(),
        other => other.to_json().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use edubuddy_store::{MemoryStore, StoreError};
    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;

    fn sample_store() -> MemoryStore {
        MemoryStore::from_json(json!({
            "PDF Notes": {"Department": {"IT": {"Semester 1": {"Subjects": {
                "Data Structures": {
                    "Unit I": {"Name": "Arrays and Lists", "getPDFlink": "https://files.example.com/ds1.pdf"},
                    "Unit II": {"Name": "Trees", "getPDFlink": "not-a-url"},
                    "Unit III": {"Name": "Graphs", "getPDFlink": ""},
                    "notes": "loose value"
                },
                "Discrete Maths": {}
            }}}}},
            "PYQ": {"Department": {"IT": {"Semester 1": {"Subjects": {
                "Data Structures": {"Insem": {"getPYQlink": "https://files.example.com/ds-insem.pdf"}}
            }}}}},
            "Syllabus Structure": {"Department": {"IT": {"Semester 1": {
                "Get Syllabus Structure": "https://files.example.com/it-s1.pdf"
            }}}}
        }))
    }

    fn pdf(unit: &str) -> FacetSelection {
        FacetSelection::new()
            .with_department("it")
            .with_semester("1")
            .with_subject("Data Structures")
            .with_unit(unit)
    }

    #[tokio::test]
    async fn test_fetch_pdf_link() {
        let browser = MaterialBrowser::new(sample_store());
        let link = browser
            .fetch_link(MaterialKind::PdfNotes, &pdf("Unit I"))
            .await
            .unwrap();
        assert_eq!(link.as_str(), "https://files.example.com/ds1.pdf");
        assert!(browser.fetch_control().is_enabled());
    }

    #[tokio::test]
    async fn test_non_url_link_rejected() {
        let browser = MaterialBrowser::new(sample_store());
        let err = browser
            .fetch_link(MaterialKind::PdfNotes, &pdf("Unit II"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MaterialError::InvalidLink {
                reason: LinkRejection::BadScheme,
                ..
            }
        ));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_empty_and_missing_links_not_found() {
        let browser = MaterialBrowser::new(sample_store());
        let empty = browser
            .fetch_link(MaterialKind::PdfNotes, &pdf("Unit III"))
            .await
            .unwrap_err();
        assert!(matches!(empty, MaterialError::NotFound { .. }));

        let missing = browser
            .fetch_link(MaterialKind::PdfNotes, &pdf("Unit IX"))
            .await
            .unwrap_err();
        assert!(matches!(missing, MaterialError::NotFound { ref path }
            if path == "PDF Notes/Department/IT/Semester 1/Subjects/Data Structures/Unit IX/getPDFlink"));
    }

    #[tokio::test]
    async fn test_fetch_pyq_and_syllabus() {
        let browser = MaterialBrowser::new(sample_store());
        let sel = FacetSelection::new()
            .with_department("it")
            .with_semester("1")
            .with_subject("Data Structures")
            .with_exam_type("insem");
        let link = browser.fetch_link(MaterialKind::Pyqs, &sel).await.unwrap();
        assert_eq!(link.as_str(), "https://files.example.com/ds-insem.pdf");

        let sel = FacetSelection::new().with_department("it").with_semester("1");
        let link = browser.fetch_link(MaterialKind::Syllabus, &sel).await.unwrap();
        assert_eq!(link.as_str(), "https://files.example.com/it-s1.pdf");
    }

    #[tokio::test]
    async fn test_resolve_errors_do_not_touch_control() {
        let browser = MaterialBrowser::new(sample_store());
        let sel = FacetSelection::new().with_department("civil").with_semester("1");
        let err = browser.fetch_link(MaterialKind::Syllabus, &sel).await.unwrap_err();
        assert_eq!(err.user_message(crate::MaterialAction::FetchMaterial), "Invalid department selection.");
        assert!(browser.fetch_control().is_enabled());
    }

    #[tokio::test]
    async fn test_list_subjects_and_units() {
        let browser = MaterialBrowser::new(sample_store());
        let sel = FacetSelection::new().with_department("it").with_semester("1");
        let subjects = browser.list_subjects(MaterialKind::PdfNotes, &sel).await.unwrap();
        assert_eq!(subjects, vec!["Data Structures", "Discrete Maths"]);

        let units = browser
            .list_units(MaterialKind::PdfNotes, &sel.clone().with_subject("Data Structures"))
            .await
            .unwrap();
        let keys: Vec<_> = units.iter().map(|u| u.key.as_str()).collect();
        assert_eq!(keys, vec!["Unit I", "Unit II", "Unit III"]);
        assert_eq!(units[0].name, "Arrays and Lists");

        let none = browser
            .list_subjects(
                MaterialKind::Pyqs,
                &FacetSelection::new().with_department("mech").with_semester("2"),
            )
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_reenables_control() {
        let store = sample_store().with_failing_path("PDF Notes");
        let browser = MaterialBrowser::new(store);
        let err = browser
            .fetch_link(MaterialKind::PdfNotes, &pdf("Unit I"))
            .await
            .unwrap_err();
        assert!(matches!(err, MaterialError::RemoteReadFailure { .. }));
        assert!(err.is_retryable());
        assert!(browser.fetch_control().is_enabled());
    }

    /// Store whose reads block until released.
    struct GatedStore {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl MaterialStore for GatedStore {
        async fn get(&self, _path: &StoragePath) -> Result<Option<StoreNode>, StoreError> {
            self.gate.notified().await;
            Ok(Some(StoreNode::text("https://late.example.com")))
        }
    }

    #[tokio::test]
    async fn test_control_disabled_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let browser = Arc::new(MaterialBrowser::new(GatedStore { gate: gate.clone() }));
        let sel = FacetSelection::new().with_department("it").with_semester("1");

        let first = {
            let browser = browser.clone();
            let sel = sel.clone();
            tokio::spawn(async move { browser.fetch_link(MaterialKind::Syllabus, &sel).await })
        };

        while browser.fetch_control().is_enabled() {
            tokio::task::yield_now().await;
        }

        let second = browser.fetch_link(MaterialKind::Syllabus, &sel).await;
        assert!(matches!(second, Err(MaterialError::Busy("getMaterial"))));

        gate.notify_one();
        let link = first.await.unwrap().unwrap();
        assert_eq!(link.as_str(), "https://late.example.com");
        assert!(browser.fetch_control().is_enabled());
    }
}
