//! End-to-end test infrastructure for EduBuddy.
//!
//! Provides a shared TestHarness over an in-memory copy of a realistic
//! materials tree and a mock identity provider.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};

use edubuddy_auth::{AccountService, MockIdentity, SessionStore};
use edubuddy_catalog::MaterialBrowser;
use edubuddy_search::SearchIndex;
use edubuddy_store::MemoryStore;

/// A database export shaped like the production tree.
pub fn portal_fixture() -> Value {
    json!({
        "PDF Notes": {"Department": {
            "IT": {
                "Semester 1": {"Subjects": {
                    "Data Structures": {
                        "Unit I": {"Name": "Arrays and Linked Lists", "getPDFlink": "https://drive.example.com/ds-u1"},
                        "Unit II": {"Name": "Stacks and Queues", "getPDFlink": "https://drive.example.com/ds-u2"},
                        "Unit III": {"Name": "Trees"}
                    },
                    "Discrete Mathematics": {
                        "Unit I": {"Name": "Set Theory", "getPDFlink": "https://drive.example.com/dm-u1"}
                    }
                }},
                "Semester 2": {"Subjects": {
                    "Computer Networks": {
                        "Unit I": {"Name": "Physical Layer", "getPDFlink": "drive.example.com/cn-u1"}
                    }
                }}
            },
            "Mechanics": {
                "Semester 3": {"Subjects": {
                    "Thermodynamics": {
                        "Unit I": {"Name": "Laws of Thermodynamics", "getPDFlink": "https://drive.example.com/th-u1"}
                    }
                }}
            }
        }},
        "PYQ": {"Department": {
            "IT": {"Semester 1": {"Subjects": {
                "Data Structures": {
                    "Insem": {"getPYQlink": "https://drive.example.com/ds-insem"},
                    "Endsem": {"getPYQlink": ""}
                }
            }}}
        }},
        "Syllabus Structure": {"Department": {
            "IT": {
                "Semester 1": {"Get Syllabus Structure": "https://drive.example.com/it-s1"},
                "Semester 2": {"Get Syllabus Structure": "https://drive.example.com/it-s2"}
            },
            "Mechanics": {
                "Semester 3": {"Get Syllabus Structure": "https://drive.example.com/me-s3"}
            }
        }}
    })
}

/// Shared test harness for E2E tests.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    pub store: Arc<MemoryStore>,
    pub browser: MaterialBrowser<Arc<MemoryStore>>,
    pub index: SearchIndex,
    pub identity: Arc<MockIdentity>,
    pub accounts: AccountService<MockIdentity>,
}

impl TestHarness {
    /// Harness over `portal_fixture()` with no accounts.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::from_json(portal_fixture()))
    }

    pub fn with_store(store: MemoryStore) -> Self {
        Self::with_parts(store, MockIdentity::new())
    }

    pub fn with_identity(identity: MockIdentity) -> Self {
        Self::with_parts(MemoryStore::from_json(portal_fixture()), identity)
    }

    fn with_parts(store: MemoryStore, identity: MockIdentity) -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(store);
        let identity = Arc::new(identity);
        let accounts = AccountService::new(
            Arc::clone(&identity),
            SessionStore::new(temp_dir.path().join("session.json")),
        );

        Self {
            browser: MaterialBrowser::new(Arc::clone(&store)),
            index: SearchIndex::default(),
            store,
            identity,
            accounts,
            _temp_dir: temp_dir,
        }
    }

    /// Write `portal_fixture()` to a JSON file inside the harness dir.
    pub fn write_fixture(&self) -> PathBuf {
        let path = self._temp_dir.path().join("export.json");
        let raw = serde_json::to_string_pretty(&portal_fixture()).expect("Failed to serialize");
        std::fs::write(&path, raw).expect("Failed to write fixture");
        path
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
