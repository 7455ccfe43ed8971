//! Locally persisted session data.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
}

/// Small JSON file holding the username shown on the dashboard.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persisted username, if any.
    pub fn user_name(&self) -> Result<Option<String>, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: SessionFile = serde_json::from_str(&raw)?;
        Ok(file.user_name.filter(|name| !name.is_empty()))
    }

    pub fn set_user_name(&self, name: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = SessionFile {
            user_name: Some(name.to_string()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Remove the session. A missing file is not an error.
    pub fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("nested/session.json"));

        assert_eq!(store.user_name().unwrap(), None);
        store.set_user_name("asha").unwrap();
        assert_eq!(store.user_name().unwrap().as_deref(), Some("asha"));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"userName\""));

        store.clear().unwrap();
        assert_eq!(store.user_name().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        assert!(SessionStore::new(path).user_name().is_err());
    }
}
