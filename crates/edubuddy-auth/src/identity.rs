//! Identity provider abstraction.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::AuthError;

/// A signed-in account as reported by the provider.
#[derive(Debug, Clone)]
pub struct IdentityUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub email_verified: bool,
    /// Token authorising follow-up calls for this user
    pub id_token: SecretString,
}

impl IdentityUser {
    /// Display name, or the local part of the email.
    pub fn preferred_name(&self) -> String {
        match self.display_name.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Hosted email/password identity provider.
///
/// Sign-out is purely local and has no counterpart here.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create an account. The new user is signed in.
    async fn create_account(&self, email: &str, password: &str)
        -> Result<IdentityUser, AuthError>;

    /// Set the display name, returning the updated user.
    async fn update_display_name(
        &self,
        user: &IdentityUser,
        display_name: &str,
    ) -> Result<IdentityUser, AuthError>;

    async fn send_verification_email(&self, user: &IdentityUser) -> Result<(), AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser, AuthError>;

    /// Re-read the account profile, including the verified flag.
    async fn lookup(&self, user: &IdentityUser) -> Result<IdentityUser, AuthError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;
}
