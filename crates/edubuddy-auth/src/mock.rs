//! In-process identity provider for tests and offline use.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::{AuthError, AuthErrorCode};
use crate::identity::{IdentityService, IdentityUser};

const MIN_PROVIDER_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct MockAccount {
    uid: String,
    email: String,
    password: String,
    display_name: Option<String>,
    verified: bool,
}

#[derive(Debug, Default)]
struct MockState {
    accounts: Vec<MockAccount>,
    verification_sent: Vec<String>,
    reset_sent: Vec<String>,
    fail_with: Option<AuthErrorCode>,
}

/// Identity provider backed by an in-memory account list.
///
/// Mirrors the provider's observable behaviour: unknown users and wrong
/// passwords both surface as `InvalidCredential` on sign-in.
#[derive(Debug, Default)]
pub struct MockIdentity {
    state: Mutex<MockState>,
}

impl MockIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register an account.
    pub fn with_account(
        self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
        verified: bool,
    ) -> Self {
        {
            let mut state = self.lock();
            let uid = format!("mock-uid-{}", state.accounts.len() + 1);
            state.accounts.push(MockAccount {
                uid,
                email: email.to_string(),
                password: password.to_string(),
                display_name: display_name.map(String::from),
                verified,
            });
        }
        self
    }

    /// Make every following call fail with `code`.
    pub fn fail_with(&self, code: AuthErrorCode) {
        self.lock().fail_with = Some(code);
    }

    /// Mark an account's email as verified.
    pub fn verify_email(&self, email: &str) {
        if let Some(account) = self.lock().accounts.iter_mut().find(|a| a.email == email) {
            account.verified = true;
        }
    }

    /// Addresses that were sent a verification email.
    pub fn verification_emails(&self) -> Vec<String> {
        self.lock().verification_sent.clone()
    }

    /// Addresses that were sent a password reset email.
    pub fn reset_emails(&self) -> Vec<String> {
        self.lock().reset_sent.clone()
    }

    pub fn account_count(&self) -> usize {
        self.lock().accounts.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_failure(state: &MockState) -> Result<(), AuthError> {
        match &state.fail_with {
            Some(code) => Err(AuthError::rejected(code.clone(), code.as_str())),
            None => Ok(()),
        }
    }

    fn check_email(email: &str) -> Result<(), AuthError> {
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if valid {
            Ok(())
        } else {
            Err(AuthError::rejected(AuthErrorCode::InvalidEmail, "INVALID_EMAIL"))
        }
    }

    fn to_user(account: &MockAccount) -> IdentityUser {
        IdentityUser {
            uid: account.uid.clone(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            email_verified: account.verified,
            id_token: SecretString::from(format!("mock-token-{}", account.uid)),
        }
    }
}

#[async_trait]
impl IdentityService for MockIdentity {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityUser, AuthError> {
        let mut state = self.lock();
        Self::check_failure(&state)?;
        Self::check_email(email)?;
        if state.accounts.iter().any(|a| a.email == email) {
            return Err(AuthError::rejected(AuthErrorCode::EmailAlreadyInUse, "EMAIL_EXISTS"));
        }
        if password.chars().count() < MIN_PROVIDER_PASSWORD_LEN {
            return Err(AuthError::rejected(AuthErrorCode::WeakPassword, "WEAK_PASSWORD"));
        }

        let account = MockAccount {
            uid: format!("mock-uid-{}", state.accounts.len() + 1),
            email: email.to_string(),
            password: password.to_string(),
            display_name: None,
            verified: false,
        };
        let user = Self::to_user(&account);
        state.accounts.push(account);
        Ok(user)
    }

    async fn update_display_name(
        &self,
        user: &IdentityUser,
        display_name: &str,
    ) -> Result<IdentityUser, AuthError> {
        let mut state = self.lock();
        Self::check_failure(&state)?;
        let account = state
            .accounts
            .iter_mut()
            .find(|a| a.uid == user.uid)
            .ok_or_else(|| AuthError::rejected(AuthErrorCode::UserNotFound, "USER_NOT_FOUND"))?;
        account.display_name = Some(display_name.to_string());
        Ok(Self::to_user(account))
    }

    async fn send_verification_email(&self, user: &IdentityUser) -> Result<(), AuthError> {
        let mut state = self.lock();
        Self::check_failure(&state)?;
        state.verification_sent.push(user.email.clone());
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser, AuthError> {
        let state = self.lock();
        Self::check_failure(&state)?;
        Self::check_email(email)?;
        state
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(Self::to_user)
            .ok_or_else(|| {
                AuthError::rejected(AuthErrorCode::InvalidCredential, "INVALID_LOGIN_CREDENTIALS")
            })
    }

    async fn lookup(&self, user: &IdentityUser) -> Result<IdentityUser, AuthError> {
        let state = self.lock();
        Self::check_failure(&state)?;
        state
            .accounts
            .iter()
            .find(|a| a.uid == user.uid)
            .map(Self::to_user)
            .ok_or_else(|| AuthError::rejected(AuthErrorCode::UserNotFound, "USER_NOT_FOUND"))
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let mut state = self.lock();
        Self::check_failure(&state)?;
        Self::check_email(email)?;
        if !state.accounts.iter().any(|a| a.email == email) {
            return Err(AuthError::rejected(AuthErrorCode::UserNotFound, "EMAIL_NOT_FOUND"));
        }
        state.reset_sent.push(email.to_string());
        Ok(())
    }
}
