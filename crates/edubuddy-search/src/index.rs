//! The cached record list and the query surface.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use tracing::{debug, info, warn};

use edubuddy_store::{MaterialStore, StoreNode};
use edubuddy_types::{MaterialKind, SearchRecord, StoragePath};

use crate::error::SearchError;
use crate::flatten::{flatten_root, FlattenOptions};

/// A kind root that could not be read during refresh.
#[derive(Debug)]
pub struct RootFailure {
    pub kind: MaterialKind,
    pub error: SearchError,
}

impl RootFailure {
    /// Notice shown to the user for this failure.
    pub fn notice(&self) -> String {
        format!("Could not load some {} for search.", self.kind)
    }
}

/// Outcome of a refresh.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Records now held by the index
    pub total: usize,
    /// Record count per kind, in walk order
    pub per_kind: Vec<(MaterialKind, usize)>,
    /// Roots whose read failed; they contributed no records
    pub failures: Vec<RootFailure>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// One user notice per failed root.
    pub fn notices(&self) -> Vec<String> {
        self.failures.iter().map(RootFailure::notice).collect()
    }
}

/// What a query shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView {
    /// Blank query: results are hidden
    Hidden,
    /// The index is not loaded or holds no records
    Unavailable,
    /// Nothing matched
    NoResults,
    /// Matching records in index order
    Results(Vec<SearchRecord>),
}

impl SearchView {
    /// Message shown in place of results, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SearchView::NoResults => Some("No materials found matching your search."),
            _ => None,
        }
    }

    pub fn results(&self) -> &[SearchRecord] {
        match self {
            SearchView::Results(records) => records,
            _ => &[],
        }
    }
}

/// In-memory search index.
///
/// The record list is replaced as a whole; readers holding a snapshot keep
/// seeing the list they started with.
#[derive(Debug, Default)]
pub struct SearchIndex {
    records: RwLock<Option<Arc<Vec<SearchRecord>>>>,
    options: FlattenOptions,
}

impl SearchIndex {
    pub fn new(options: FlattenOptions) -> Self {
        Self {
            records: RwLock::new(None),
            options,
        }
    }

    /// Build an index from already flattened records.
    pub fn from_records(records: Vec<SearchRecord>) -> Self {
        let index = Self::default();
        index.load(records);
        index
    }

    /// Replace the record list.
    pub fn load(&self, records: Vec<SearchRecord>) {
        let mut guard = self.records.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Arc::new(records));
    }

    /// Current record list, if loaded.
    pub fn snapshot(&self) -> Option<Arc<Vec<SearchRecord>>> {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    pub fn len(&self) -> usize {
        self.snapshot().map_or(0, |records| records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the three kind roots concurrently and rebuild the record list.
    ///
    /// A failed root is logged and reported; the other roots still load.
    /// The new list replaces the old one only once all reads have finished.
    pub async fn refresh<S>(&self, store: &S) -> RefreshReport
    where
        S: MaterialStore + ?Sized,
    {
        let start = Instant::now();

        let (pdf, pyq, syllabus) = tokio::join!(
            read_root(store, MaterialKind::PdfNotes),
            read_root(store, MaterialKind::Pyqs),
            read_root(store, MaterialKind::Syllabus),
        );

        let mut records = Vec::new();
        let mut report = RefreshReport::default();

        for (kind, result) in [
            (MaterialKind::PdfNotes, pdf),
            (MaterialKind::Pyqs, pyq),
            (MaterialKind::Syllabus, syllabus),
        ] {
            match result {
                Ok(Some(departments)) => {
                    let flattened = flatten_root(kind, &departments, self.options);
                    report.per_kind.push((kind, flattened.len()));
                    records.extend(flattened);
                }
                Ok(None) => {
                    warn!(kind = %kind, "No data found for root");
                    report.per_kind.push((kind, 0));
                }
                Err(error) => {
                    warn!(kind = %kind, error = %error, "Failed to load root for search");
                    report.per_kind.push((kind, 0));
                    report.failures.push(RootFailure { kind, error });
                }
            }
        }

        report.total = records.len();
        if report.total == 0 {
            warn!("Search index loaded with no records");
        }
        self.load(records);

        info!(
            total = report.total,
            failures = report.failures.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search index refreshed"
        );

        report
    }

    /// Case-insensitive substring query over the search keys.
    pub fn search(&self, query: &str) -> SearchView {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return SearchView::Hidden;
        }

        let Some(records) = self.snapshot().filter(|records| !records.is_empty()) else {
            debug!("Search requested before index load");
            return SearchView::Unavailable;
        };

        let matches: Vec<SearchRecord> = records
            .iter()
            .filter(|record| record.matches(&needle))
            .cloned()
            .collect();

        debug!(query = %needle, matches = matches.len(), "Search");

        if matches.is_empty() {
            SearchView::NoResults
        } else {
            SearchView::Results(matches)
        }
    }
}

async fn read_root<S>(store: &S, kind: MaterialKind) -> Result<Option<StoreNode>, SearchError>
where
    S: MaterialStore + ?Sized,
{
    let path = StoragePath::root().child(kind.store_root()).child("Department");
    store
        .get(&path)
        .await
        .map_err(|source| SearchError::RootRead { kind, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use edubuddy_store::MemoryStore;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::from_json(json!({
            "PDF Notes": {"Department": {"IT": {"Semester 1": {"Subjects": {
                "Data Structures": {
                    "Unit I": {"Name": "Arrays and Linked Lists", "getPDFlink": "https://x/ds1.pdf"},
                    "Unit II": {"Name": "Stacks", "getPDFlink": "https://x/ds2.pdf"}
                }
            }}}}},
            "PYQ": {"Department": {"IT": {"Semester 1": {"Subjects": {
                "Data Structures": {"Insem": {"getPYQlink": "https://x/ds-insem.pdf"}}
            }}}}},
            "Syllabus Structure": {"Department": {"Mechanics": {
                "Semester 2": {"Get Syllabus Structure": "https://x/me-s2.pdf"}
            }}}
        }))
    }

    #[tokio::test]
    async fn test_refresh_counts_per_kind() {
        let index = SearchIndex::default();
        let report = index.refresh(&store()).await;

        assert!(report.is_complete());
        assert_eq!(report.total, 4);
        assert_eq!(
            report.per_kind,
            vec![
                (MaterialKind::PdfNotes, 2),
                (MaterialKind::Pyqs, 1),
                (MaterialKind::Syllabus, 1),
            ]
        );
        assert_eq!(index.len(), 4);
    }

    #[tokio::test]
    async fn test_match_on_unit_name_only() {
        let index = SearchIndex::default();
        index.refresh(&store()).await;

        let view = index.search("LINKED");
        let results = view.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].unit_key.as_deref(), Some("Unit I"));
    }

    #[tokio::test]
    async fn test_keyword_matches_kind() {
        let index = SearchIndex::default();
        index.refresh(&store()).await;

        let view = index.search("previous year");
        assert_eq!(view.results().len(), 1);
        assert_eq!(view.results()[0].kind, MaterialKind::Pyqs);

        let view = index.search("  syllabus  ");
        assert_eq!(view.results().len(), 1);
    }

    #[tokio::test]
    async fn test_results_keep_index_order() {
        let index = SearchIndex::default();
        index.refresh(&store()).await;

        let kinds: Vec<_> = index
            .search("data structures")
            .results()
            .iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![MaterialKind::PdfNotes, MaterialKind::PdfNotes, MaterialKind::Pyqs]
        );
    }

    #[tokio::test]
    async fn test_no_results_message() {
        let index = SearchIndex::default();
        index.refresh(&store()).await;

        let view = index.search("quantum");
        assert_eq!(view, SearchView::NoResults);
        assert_eq!(view.message(), Some("No materials found matching your search."));
    }

    #[test]
    fn test_blank_query_hidden() {
        let index = SearchIndex::from_records(Vec::new());
        assert_eq!(index.search("   "), SearchView::Hidden);
        assert_eq!(index.search(""), SearchView::Hidden);
    }

    #[test]
    fn test_unloaded_index_unavailable() {
        let index = SearchIndex::default();
        assert!(!index.is_loaded());
        assert_eq!(index.search("data"), SearchView::Unavailable);

        index.load(Vec::new());
        assert_eq!(index.search("data"), SearchView::Unavailable);
    }

    #[tokio::test]
    async fn test_failed_root_does_not_block_others() {
        let store = store().with_failing_path(StoragePath::parse("PYQ"));
        let index = SearchIndex::default();
        let report = index.refresh(&store).await;

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, MaterialKind::Pyqs);
        assert_eq!(report.notices(), vec!["Could not load some PYQs for search.".to_string()]);
        assert_eq!(report.total, 3);
        assert!(index
            .snapshot()
            .unwrap()
            .iter()
            .all(|r| r.kind != MaterialKind::Pyqs));
    }

    #[tokio::test]
    async fn test_missing_root_yields_no_records() {
        let store = MemoryStore::from_json(json!({
            "Syllabus Structure": {"Department": {"IT": {
                "Semester 1": {"Get Syllabus Structure": "https://x/it-s1.pdf"}
            }}}
        }));
        let index = SearchIndex::default();
        let report = index.refresh(&store).await;

        assert!(report.is_complete());
        assert_eq!(report.total, 1);
    }

    #[tokio::test]
    async fn test_refresh_replaces_previous_list() {
        let index = SearchIndex::default();
        index.refresh(&store()).await;
        let before = index.snapshot().unwrap();

        index.refresh(&MemoryStore::empty()).await;

        assert_eq!(before.len(), 4);
        assert_eq!(index.len(), 0);
    }
}
