//! Material popup flows: dropdown listing, facet invalidation and link fetch.

use pretty_assertions::assert_eq;

use e2e_tests::TestHarness;
use edubuddy_catalog::{MaterialAction, MaterialError, MaterialSelection, ResolveError};
use edubuddy_types::{Facet, MaterialKind};

#[tokio::test]
async fn test_pdf_notes_full_flow() {
    let harness = TestHarness::new();
    let mut selection = MaterialSelection::open(MaterialKind::PdfNotes);
    assert_eq!(selection.title(), "Select PDF Notes");

    selection.set_department("it");
    selection.set_semester("1");
    let subjects = harness
        .browser
        .list_subjects(selection.kind(), selection.facets())
        .await
        .unwrap();
    assert_eq!(subjects, vec!["Data Structures", "Discrete Mathematics"]);

    selection.set_subject("Data Structures").unwrap();
    let units = harness
        .browser
        .list_units(selection.kind(), selection.facets())
        .await
        .unwrap();
    let keys: Vec<_> = units.iter().map(|u| u.key.as_str()).collect();
    assert_eq!(keys, vec!["Unit I", "Unit II", "Unit III"]);

    selection.set_unit("Unit II").unwrap();
    let link = harness
        .browser
        .fetch_link(selection.kind(), selection.facets())
        .await
        .unwrap();
    assert_eq!(link.as_str(), "https://drive.example.com/ds-u2");
}

#[tokio::test]
async fn test_changing_semester_clears_subject_and_unit() {
    let harness = TestHarness::new();
    let mut selection = MaterialSelection::open(MaterialKind::PdfNotes);
    selection.set_department("it");
    selection.set_semester("1");
    selection.set_subject("Data Structures").unwrap();
    selection.set_unit("Unit I").unwrap();

    selection.set_semester("2");
    let err = harness
        .browser
        .fetch_link(selection.kind(), selection.facets())
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(MaterialAction::FetchMaterial),
        "Please select Subject and Unit for PDF Notes."
    );
}

#[tokio::test]
async fn test_unit_without_link_is_not_found() {
    let harness = TestHarness::new();
    let mut selection = MaterialSelection::open(MaterialKind::PdfNotes);
    selection.set_department("it");
    selection.set_semester("1");
    selection.set_subject("Data Structures").unwrap();
    selection.set_unit("Unit III").unwrap();

    let err = harness
        .browser
        .fetch_link(selection.kind(), selection.facets())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.user_message(MaterialAction::FetchMaterial),
        "Material not found for the selected criteria."
    );
}

#[tokio::test]
async fn test_link_without_scheme_is_invalid() {
    let harness = TestHarness::new();
    let mut selection = MaterialSelection::open(MaterialKind::PdfNotes);
    selection.set_department("it");
    selection.set_semester("2");
    selection.set_subject("Computer Networks").unwrap();
    selection.set_unit("Unit I").unwrap();

    let err = harness
        .browser
        .fetch_link(selection.kind(), selection.facets())
        .await
        .unwrap_err();
    assert!(matches!(err, MaterialError::InvalidLink { .. }));
    assert_eq!(
        err.user_message(MaterialAction::FetchMaterial),
        "Material link is empty, invalid, or not a valid URL."
    );
}

#[tokio::test]
async fn test_pyq_and_syllabus_links() {
    let harness = TestHarness::new();

    let mut pyq = MaterialSelection::open(MaterialKind::Pyqs);
    pyq.set_department("it");
    pyq.set_semester("1");
    pyq.set_subject("Data Structures").unwrap();
    pyq.set_exam_type("insem").unwrap();
    let link = harness.browser.fetch_link(pyq.kind(), pyq.facets()).await.unwrap();
    assert_eq!(link.as_str(), "https://drive.example.com/ds-insem");

    pyq.set_exam_type("endsem").unwrap();
    let err = harness.browser.fetch_link(pyq.kind(), pyq.facets()).await.unwrap_err();
    assert!(err.is_not_found());

    let mut syllabus = MaterialSelection::open(MaterialKind::Syllabus);
    syllabus.set_department("mech");
    syllabus.set_semester("3");
    assert!(syllabus.set_subject("Thermodynamics").is_err());
    let link = harness
        .browser
        .fetch_link(syllabus.kind(), syllabus.facets())
        .await
        .unwrap();
    assert_eq!(link.as_str(), "https://drive.example.com/me-s3");
}

#[tokio::test]
async fn test_unknown_department_and_missing_facets() {
    let harness = TestHarness::new();

    let mut selection = MaterialSelection::open(MaterialKind::Syllabus);
    selection.set_semester("1");
    let err = harness
        .browser
        .fetch_link(selection.kind(), selection.facets())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MaterialError::Resolve(ResolveError::MissingFacet { ref facets, .. }) if facets == &vec![Facet::Department]
    ));
    assert_eq!(
        err.user_message(MaterialAction::FetchMaterial),
        "Please select Department and Semester."
    );

    selection.set_department("civil");
    let err = harness
        .browser
        .fetch_link(selection.kind(), selection.facets())
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(MaterialAction::FetchMaterial),
        "Invalid department selection."
    );
}

#[tokio::test]
async fn test_store_failure_messages_per_action() {
    let store = edubuddy_store::MemoryStore::from_json(e2e_tests::portal_fixture())
        .with_failing_path("PDF Notes");
    let harness = TestHarness::with_store(store);

    let mut selection = MaterialSelection::open(MaterialKind::PdfNotes);
    selection.set_department("it");
    selection.set_semester("1");

    let err = harness
        .browser
        .list_subjects(selection.kind(), selection.facets())
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.user_message(MaterialAction::LoadSubjects), "Failed to load subjects.");

    selection.set_subject("Data Structures").unwrap();
    let err = harness
        .browser
        .list_units(selection.kind(), selection.facets())
        .await
        .unwrap_err();
    assert_eq!(err.user_message(MaterialAction::LoadUnits), "Failed to load units.");

    selection.set_unit("Unit I").unwrap();
    let err = harness
        .browser
        .fetch_link(selection.kind(), selection.facets())
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(MaterialAction::FetchMaterial),
        "Failed to fetch material. Please try again."
    );
    assert!(harness.browser.fetch_control().is_enabled());
}
