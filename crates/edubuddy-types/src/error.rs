//! Error types shared across the EduBuddy crates.

use thiserror::Error;

/// Unified error type for configuration and domain parsing.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Department code outside the lookup table
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
