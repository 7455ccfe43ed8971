//! REST client for the realtime database.
//!
//! Each read is a `GET {base}/{segments...}.json`. A JSON `null` body means
//! the node does not exist. Transient failures are retried with exponential
//! backoff up to `max_retries` attempts.

use std::time::Duration;

use async_trait::async_trait;
use backoff::{backoff::Backoff, ExponentialBackoff};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, warn};

use edubuddy_types::{DatabaseSettings, StoragePath};

use crate::error::StoreError;
use crate::node::StoreNode;
use crate::store::MaterialStore;

/// Configuration for the realtime database client.
#[derive(Debug, Clone)]
pub struct RtdbConfig {
    /// Database base URL (e.g., "https://project-default-rtdb.firebasedatabase.app")
    pub base_url: String,

    /// Optional auth token sent as the `auth` query parameter
    pub auth_token: Option<SecretString>,

    /// Request timeout
    pub timeout: Duration,

    /// Maximum attempts per read
    pub max_retries: u32,
}

impl RtdbConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }

    pub fn from_settings(settings: &DatabaseSettings) -> Self {
        Self {
            base_url: settings.url.clone(),
            auth_token: settings.auth_token.clone().map(SecretString::from),
            timeout: Duration::from_secs(settings.timeout_secs),
            max_retries: settings.max_retries.max(1),
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }
}

/// Realtime database store.
pub struct RtdbStore {
    client: Client,
    base: Url,
    config: RtdbConfig,
}

impl RtdbStore {
    /// Create a new client.
    pub fn new(config: RtdbConfig) -> Result<Self, StoreError> {
        let base = Url::parse(config.base_url.trim())
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(StoreError::Http)?;

        Ok(Self {
            client,
            base,
            config,
        })
    }

    /// REST URL for a node, with each segment percent-encoded.
    pub fn node_url(&self, path: &StoragePath) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidUrl(self.config.base_url.clone()))?;
            segments.pop_if_empty();
            match path.segments().split_last() {
                None => {
                    segments.push(".json");
                }
                Some((last, init)) => {
                    segments.extend(init);
                    segments.push(&format!("{last}.json"));
                }
            }
        }
        if let Some(token) = &self.config.auth_token {
            url.query_pairs_mut()
                .append_pair("auth", token.expose_secret());
        }
        Ok(url)
    }

    /// Make a single read request.
    async fn fetch_once(&self, url: &Url) -> Result<Option<StoreNode>, StoreError> {
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(StoreNode::from_json(value))
    }
}

#[async_trait]
impl MaterialStore for RtdbStore {
    async fn get(&self, path: &StoragePath) -> Result<Option<StoreNode>, StoreError> {
        let url = self.node_url(path)?;

        let mut backoff = ExponentialBackoff {
            initial_interval: Duration::from_millis(200),
            max_elapsed_time: Some(self.config.timeout * self.config.max_retries),
            ..Default::default()
        };

        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(path = %path, attempt = attempts, "Reading store node");

            match self.fetch_once(&url).await {
                Ok(node) => {
                    debug!(path = %path, exists = node.is_some(), "Store read complete");
                    return Ok(node);
                }
                Err(e) => {
                    if !e.is_transient() || attempts >= self.config.max_retries {
                        error!(path = %path, error = %e, attempts, "Store read failed");
                        return Err(e);
                    }

                    match backoff.next_backoff() {
                        Some(duration) => {
                            warn!(
                                path = %path,
                                error = %e,
                                retry_in_ms = duration.as_millis(),
                                "Store read failed, retrying"
                            );
                            tokio::time::sleep(duration).await;
                        }
                        None => {
                            error!(path = %path, error = %e, "Backoff exhausted");
                            return Err(e);
                        }
                    }
                }
            }
        }
    }
}
