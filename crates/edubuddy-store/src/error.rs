//! Store error types.

use thiserror::Error;

/// Errors that can occur while reading from the store.
///
/// A node that does not exist is not an error; reads return `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not valid JSON
    #[error("Failed to decode store response: {0}")]
    Decode(String),

    /// Base URL cannot address nodes
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// IO error (local JSON exports)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Injected or simulated outage
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether re-issuing the same read may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            StoreError::Status { status, .. } => *status == 429 || *status >= 500,
            StoreError::Unavailable(_) => true,
            StoreError::Decode(_) | StoreError::InvalidUrl(_) | StoreError::Io(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transience() {
        let server = StoreError::Status {
            status: 503,
            body: String::new(),
        };
        assert!(server.is_transient());

        let limited = StoreError::Status {
            status: 429,
            body: String::new(),
        };
        assert!(limited.is_transient());

        let denied = StoreError::Status {
            status: 401,
            body: "Permission denied".to_string(),
        };
        assert!(!denied.is_transient());
        assert!(!StoreError::Decode("eof".to_string()).is_transient());
    }
}
