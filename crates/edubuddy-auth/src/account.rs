//! Account flows: register, login, logout, password reset.
//!
//! Each flow catches its own failure and returns a single `Notice`.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use edubuddy_types::Notice;

use crate::error::{AuthError, AuthErrorCode};
use crate::identity::IdentityService;
use crate::session::SessionStore;
use crate::state::AuthState;

/// Minimum password length accepted before contacting the provider.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Name shown when nothing better is known.
pub const DEFAULT_USERNAME: &str = "User";

/// Registration form input.
#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign out locally. Needs no identity provider.
pub fn sign_out(state: &AuthState, session: &SessionStore) -> Notice {
    state.clear();
    match session.clear() {
        Ok(()) => {
            info!("Logged out");
            Notice::success("Logged out successfully.")
        }
        Err(e) => {
            error!(error = %e, "Logout failed");
            Notice::error("Logout failed. Please try again.")
        }
    }
}

fn register_failure(err: &AuthError) -> Notice {
    match err.code() {
        Some(AuthErrorCode::EmailAlreadyInUse) => Notice::error("This email is already registered."),
        Some(AuthErrorCode::InvalidEmail) => Notice::error("The email address is not valid."),
        Some(AuthErrorCode::WeakPassword) => Notice::error("Password is too weak."),
        _ => Notice::error(format!("Registration failed: {}", err.message())),
    }
}

fn login_failure(err: &AuthError) -> Notice {
    match err.code() {
        Some(
            AuthErrorCode::UserNotFound
            | AuthErrorCode::WrongPassword
            | AuthErrorCode::InvalidCredential,
        ) => Notice::error("Incorrect email or password."),
        Some(AuthErrorCode::InvalidEmail) => Notice::error("The email address is not valid."),
        Some(AuthErrorCode::TooManyRequests) => Notice::error(
            "Access temporarily disabled due to many failed login attempts. Try again later or reset your password.",
        ),
        _ => Notice::error(format!("Login failed: {}", err.message())),
    }
}

fn reset_failure(err: &AuthError) -> Notice {
    match err.code() {
        Some(AuthErrorCode::UserNotFound) => Notice::error("No user found with this email."),
        Some(AuthErrorCode::InvalidEmail) => Notice::error("The email address is not valid."),
        _ => Notice::error("Failed to send password reset email."),
    }
}

/// Account flows over an identity provider, the sign-in state and the
/// persisted session.
pub struct AccountService<I: IdentityService + ?Sized> {
    identity: Arc<I>,
    state: Arc<AuthState>,
    session: SessionStore,
}

impl<I: IdentityService + ?Sized> AccountService<I> {
    pub fn new(identity: Arc<I>, session: SessionStore) -> Self {
        Self {
            identity,
            state: Arc::new(AuthState::new()),
            session,
        }
    }

    /// Share an existing sign-in state.
    pub fn with_state(mut self, state: Arc<AuthState>) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &Arc<AuthState> {
        &self.state
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Create an account, set its display name and send a verification email.
    pub async fn register(&self, request: &RegisterRequest) -> Notice {
        if request.password != request.confirm_password {
            return Notice::error("Passwords do not match!");
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Notice::error("Password must be at least 6 characters long.");
        }

        let email = request.email.trim();
        let username = request
            .username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        match self.register_account(email, &request.password, username).await {
            Ok(()) => {
                info!(email, "Account registered, verification email sent");
                Notice::success(
                    "Verification email sent! Please check your inbox and verify before logging in.",
                )
            }
            Err(e) => {
                error!(email, error = %e, "Registration failed");
                register_failure(&e)
            }
        }
    }

    async fn register_account(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> Result<(), AuthError> {
        let mut user = self.identity.create_account(email, password).await?;
        self.state.set(user.clone());

        if let Some(name) = username {
            user = self.identity.update_display_name(&user, name).await?;
            self.state.set(user.clone());
        }

        self.identity.send_verification_email(&user).await
    }

    /// Sign in. Only verified accounts get a persisted session.
    pub async fn login(&self, email: &str, password: &str) -> Notice {
        let email = email.trim();

        let user = match self.identity.sign_in(email, password).await {
            Ok(user) => user,
            Err(e) => {
                error!(email, error = %e, "Login failed");
                return login_failure(&e);
            }
        };
        let user = match self.identity.lookup(&user).await {
            Ok(user) => user,
            Err(e) => {
                error!(email, error = %e, "Profile lookup failed");
                return login_failure(&e);
            }
        };
        self.state.set(user.clone());

        if !user.email_verified {
            debug!(email, "Sign-in with unverified email");
            return Notice::error("Please verify your email before logging in. Check your inbox.");
        }

        if let Err(e) = self.session.set_user_name(&user.preferred_name()) {
            warn!(error = %e, "Failed to persist session");
        }
        info!(email, "Login successful");
        Notice::success("Login successful! Redirecting...")
    }

    /// Sign out and forget the persisted username.
    pub async fn logout(&self) -> Notice {
        sign_out(&self.state, &self.session)
    }

    /// Send a password reset email.
    pub async fn reset_password(&self, email: &str) -> Notice {
        let email = email.trim();
        if email.is_empty() {
            return Notice::info("Please enter your email to reset password.");
        }

        match self.identity.send_password_reset(email).await {
            Ok(()) => Notice::success("Password reset email sent. Check your inbox!"),
            Err(e) => {
                error!(email, error = %e, "Password reset failed");
                reset_failure(&e)
            }
        }
    }

    /// Name shown on the dashboard: the signed-in display name, else the
    /// persisted username, else `User`.
    pub fn display_username(&self) -> String {
        let signed_in = self
            .state
            .current()
            .and_then(|user| user.display_name)
            .filter(|name| !name.is_empty());

        signed_in
            .or_else(|| match self.session.user_name() {
                Ok(name) => name,
                Err(e) => {
                    warn!(error = %e, "Could not read session");
                    None
                }
            })
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockIdentity;
    use edubuddy_types::NoticeLevel;
    use tempfile::TempDir;

    fn service(identity: MockIdentity) -> (AccountService<MockIdentity>, Arc<MockIdentity>, TempDir) {
        let dir = TempDir::new().unwrap();
        let identity = Arc::new(identity);
        let service = AccountService::new(
            Arc::clone(&identity),
            SessionStore::new(dir.path().join("session.json")),
        );
        (service, identity, dir)
    }

    fn request(password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some("Asha".into()),
            email: " asha@college.edu ".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[tokio::test]
    async fn test_register_validates_before_provider() {
        let (service, identity, _dir) = service(MockIdentity::new());

        let notice = service.register(&request("secret1", "secret2")).await;
        assert_eq!(notice, Notice::error("Passwords do not match!"));

        let notice = service.register(&request("abc", "abc")).await;
        assert_eq!(notice, Notice::error("Password must be at least 6 characters long."));

        assert_eq!(identity.account_count(), 0);
    }

    #[tokio::test]
    async fn test_register_success_sends_verification() {
        let (service, identity, _dir) = service(MockIdentity::new());

        let notice = service.register(&request("secret1", "secret1")).await;
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(
            notice.message,
            "Verification email sent! Please check your inbox and verify before logging in."
        );
        assert_eq!(identity.verification_emails(), vec!["asha@college.edu".to_string()]);
        assert_eq!(service.display_username(), "Asha");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (service, _identity, _dir) =
            service(MockIdentity::new().with_account("asha@college.edu", "secret1", None, true));
        let notice = service.register(&request("secret1", "secret1")).await;
        assert_eq!(notice, Notice::error("This email is already registered."));
    }

    #[tokio::test]
    async fn test_register_other_failure_includes_message() {
        let (service, identity, _dir) = service(MockIdentity::new());
        identity.fail_with(AuthErrorCode::Other("OPERATION_NOT_ALLOWED".into()));
        let notice = service.register(&request("secret1", "secret1")).await;
        assert_eq!(notice, Notice::error("Registration failed: OPERATION_NOT_ALLOWED"));
    }

    #[tokio::test]
    async fn test_login_unverified_writes_no_session() {
        let (service, _identity, _dir) =
            service(MockIdentity::new().with_account("asha@college.edu", "secret1", None, false));

        let notice = service.login("asha@college.edu", "secret1").await;
        assert_eq!(
            notice,
            Notice::error("Please verify your email before logging in. Check your inbox.")
        );
        assert_eq!(service.session().user_name().unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_verified_persists_email_local_part() {
        let (service, _identity, _dir) =
            service(MockIdentity::new().with_account("asha.k@college.edu", "secret1", None, true));

        let notice = service.login("asha.k@college.edu", "secret1").await;
        assert_eq!(notice, Notice::success("Login successful! Redirecting..."));
        assert_eq!(service.session().user_name().unwrap().as_deref(), Some("asha.k"));
        assert_eq!(service.display_username(), "asha.k");
    }

    #[tokio::test]
    async fn test_login_failure_messages() {
        let (service, identity, _dir) =
            service(MockIdentity::new().with_account("asha@college.edu", "secret1", None, true));

        let notice = service.login("asha@college.edu", "wrong-pw").await;
        assert_eq!(notice, Notice::error("Incorrect email or password."));

        let notice = service.login("asha", "secret1").await;
        assert_eq!(notice, Notice::error("The email address is not valid."));

        identity.fail_with(AuthErrorCode::TooManyRequests);
        let notice = service.login("asha@college.edu", "secret1").await;
        assert!(notice.message.starts_with("Access temporarily disabled"));
    }

    #[tokio::test]
    async fn test_logout_clears_state_and_session() {
        let (service, _identity, _dir) =
            service(MockIdentity::new().with_account("asha@college.edu", "secret1", Some("Asha"), true));
        service.login("asha@college.edu", "secret1").await;
        assert!(service.state().is_signed_in());

        let notice = service.logout().await;
        assert_eq!(notice, Notice::success("Logged out successfully."));
        assert!(!service.state().is_signed_in());
        assert_eq!(service.display_username(), DEFAULT_USERNAME);
    }

    #[tokio::test]
    async fn test_reset_password_flows() {
        let (service, identity, _dir) =
            service(MockIdentity::new().with_account("asha@college.edu", "secret1", None, true));

        assert_eq!(
            service.reset_password("   ").await,
            Notice::info("Please enter your email to reset password.")
        );
        assert_eq!(
            service.reset_password("nobody@college.edu").await,
            Notice::error("No user found with this email.")
        );
        assert_eq!(
            service.reset_password("asha@college.edu").await,
            Notice::success("Password reset email sent. Check your inbox!")
        );
        assert_eq!(identity.reset_emails(), vec!["asha@college.edu".to_string()]);

        identity.fail_with(AuthErrorCode::Other("INTERNAL".into()));
        assert_eq!(
            service.reset_password("asha@college.edu").await,
            Notice::error("Failed to send password reset email.")
        );
    }

    #[test]
    fn test_display_username_falls_back_to_session() {
        let (service, _identity, _dir) = service(MockIdentity::new());
        service.session().set_user_name("ravi").unwrap();
        assert_eq!(service.display_username(), "ravi");
    }
}
