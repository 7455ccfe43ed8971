//! Configuration loading for the EduBuddy client.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/edubuddy/config.toml.

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Remote hierarchical store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Base URL of the realtime database
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Optional auth token appended to every read (loaded from env, not stored in config file)
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per read on transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_database_url() -> String {
    "https://edubuddy-b8a87-default-rtdb.asia-southeast1.firebasedatabase.app".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            auth_token: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

/// Identity service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentitySettings {
    /// Web API key (loaded from env var, not stored in config file)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Identity Toolkit base URL
    #[serde(default = "default_identity_base_url")]
    pub base_url: String,
}

fn default_identity_base_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_identity_base_url(),
        }
    }
}

/// Search index settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Log skipped malformed leaves at warn instead of debug
    #[serde(default)]
    pub warn_on_malformed: bool,
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub identity: IdentitySettings,

    #[serde(default)]
    pub search: SearchSettings,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// File holding the persisted display username
    #[serde(default = "default_session_path")]
    pub session_path: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_session_path() -> String {
    ProjectDirs::from("", "", "edubuddy")
        .map(|p| p.data_local_dir().join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./session.json"))
        .to_string_lossy()
        .to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseSettings::default(),
            identity: IdentitySettings::default(),
            search: SearchSettings::default(),
            log_level: default_log_level(),
            session_path: default_session_path(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/edubuddy/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (EDUBUDDY_*, nested keys joined by `__`)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, PortalError> {
        let config_dir = ProjectDirs::from("", "", "edubuddy")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("database.url", default_database_url())
            .map_err(|e| PortalError::Config(e.to_string()))?
            .set_default("database.timeout_secs", default_timeout_secs() as i64)
            .map_err(|e| PortalError::Config(e.to_string()))?
            .set_default("database.max_retries", default_max_retries() as i64)
            .map_err(|e| PortalError::Config(e.to_string()))?
            .set_default("identity.base_url", default_identity_base_url())
            .map_err(|e| PortalError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| PortalError::Config(e.to_string()))?
            .set_default("session_path", default_session_path())
            .map_err(|e| PortalError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Format: EDUBUDDY_DATABASE__URL, EDUBUDDY_IDENTITY__API_KEY, EDUBUDDY_LOG_LEVEL
        builder = builder.add_source(
            Environment::with_prefix("EDUBUDDY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| PortalError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| PortalError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), PortalError> {
        let url = self.database.url.trim();
        if url.is_empty() {
            return Err(PortalError::Config("database.url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PortalError::Config(format!(
                "database.url must be an http(s) URL, got {url}"
            )));
        }
        if self.database.timeout_secs == 0 {
            return Err(PortalError::Config("database.timeout_secs must be > 0".to_string()));
        }
        Ok(())
    }

    /// Expand ~ in session_path to the home directory.
    pub fn expanded_session_path(&self) -> PathBuf {
        if let Some(rest) = self.session_path.strip_prefix("~/") {
            if let Some(dirs) = directories::BaseDirs::new() {
                return dirs.home_dir().join(rest);
            }
        }
        PathBuf::from(&self.session_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.database.url.contains("firebasedatabase.app"));
        assert_eq!(settings.database.timeout_secs, 30);
        assert_eq!(settings.database.max_retries, 3);
        assert_eq!(
            settings.identity.base_url,
            "https://identitytoolkit.googleapis.com/v1"
        );
        assert!(settings.identity.api_key.is_none());
        assert!(!settings.search.warn_on_malformed);
        assert!(settings.session_path.ends_with("session.json"));
    }

    #[test]
    fn test_load_with_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.database.timeout_secs, 30);
    }

    #[test]
    fn test_load_cli_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edubuddy.toml");
        std::fs::write(
            &path,
            r#"
log_level = "debug"

[database]
url = "http://127.0.0.1:9000"
timeout_secs = 5

[search]
warn_on_malformed = true
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.database.url, "http://127.0.0.1:9000");
        assert_eq!(settings.database.timeout_secs, 5);
        assert_eq!(settings.database.max_retries, 3);
        assert!(settings.search.warn_on_malformed);
    }

    #[test]
    fn test_missing_cli_file_is_an_error() {
        let result = Settings::load(Some("/nonexistent/edubuddy.toml"));
        assert!(matches!(result, Err(PortalError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_database_url() {
        let mut settings = Settings::default();
        settings.database.url = "ftp://example.com".to_string();
        assert!(settings.validate().is_err());

        settings.database.url = String::new();
        assert!(settings.validate().is_err());

        settings.database.url = "https://example.com".to_string();
        settings.database.timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_expanded_session_path_keeps_absolute() {
        let mut settings = Settings::default();
        settings.session_path = "/tmp/edubuddy/session.json".to_string();
        assert_eq!(
            settings.expanded_session_path(),
            PathBuf::from("/tmp/edubuddy/session.json")
        );
    }
}
