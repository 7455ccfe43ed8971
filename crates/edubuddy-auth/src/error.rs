//! Identity error taxonomy.

use std::fmt;

use thiserror::Error;

/// Error code reported by the identity provider.
///
/// Both the REST error strings (`EMAIL_EXISTS`) and the client SDK codes
/// (`auth/email-already-in-use`) map onto the same variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    EmailAlreadyInUse,
    InvalidEmail,
    WeakPassword,
    UserNotFound,
    WrongPassword,
    InvalidCredential,
    TooManyRequests,
    UserDisabled,
    Other(String),
}

impl AuthErrorCode {
    /// Parse a provider code. REST messages may carry a ` : detail` suffix.
    pub fn parse(raw: &str) -> Self {
        let head = raw.split(" : ").next().unwrap_or(raw).trim();
        match head {
            "auth/email-already-in-use" | "EMAIL_EXISTS" => AuthErrorCode::EmailAlreadyInUse,
            "auth/invalid-email" | "INVALID_EMAIL" | "MISSING_EMAIL" => {
                AuthErrorCode::InvalidEmail
            }
            "auth/weak-password" | "WEAK_PASSWORD" => AuthErrorCode::WeakPassword,
            "auth/user-not-found" | "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" => {
                AuthErrorCode::UserNotFound
            }
            "auth/wrong-password" | "INVALID_PASSWORD" => AuthErrorCode::WrongPassword,
            "auth/invalid-credential" | "INVALID_LOGIN_CREDENTIALS" => {
                AuthErrorCode::InvalidCredential
            }
            "auth/too-many-requests" | "TOO_MANY_ATTEMPTS_TRY_LATER" => {
                AuthErrorCode::TooManyRequests
            }
            "auth/user-disabled" | "USER_DISABLED" => AuthErrorCode::UserDisabled,
            other => AuthErrorCode::Other(other.to_string()),
        }
    }

    /// Client SDK form of the code.
    pub fn as_str(&self) -> &str {
        match self {
            AuthErrorCode::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthErrorCode::InvalidEmail => "auth/invalid-email",
            AuthErrorCode::WeakPassword => "auth/weak-password",
            AuthErrorCode::UserNotFound => "auth/user-not-found",
            AuthErrorCode::WrongPassword => "auth/wrong-password",
            AuthErrorCode::InvalidCredential => "auth/invalid-credential",
            AuthErrorCode::TooManyRequests => "auth/too-many-requests",
            AuthErrorCode::UserDisabled => "auth/user-disabled",
            AuthErrorCode::Other(code) => code,
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the identity provider or the local session file.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider rejected the request
    #[error("{message} ({code})")]
    Rejected { code: AuthErrorCode, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Identity service not configured: {0}")]
    Config(String),

    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    pub fn rejected(code: AuthErrorCode, message: impl Into<String>) -> Self {
        AuthError::Rejected {
            code,
            message: message.into(),
        }
    }

    /// Provider code, when the provider answered.
    pub fn code(&self) -> Option<&AuthErrorCode> {
        match self {
            AuthError::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Message appended to generic "failed" notices.
    pub fn message(&self) -> String {
        match self {
            AuthError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
