//! Account lifecycle E2E tests against the mock identity provider.

use pretty_assertions::assert_eq;

use e2e_tests::TestHarness;
use edubuddy_auth::{MockIdentity, RegisterRequest, DEFAULT_USERNAME};
use edubuddy_types::Notice;

fn registration(username: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        username: username.map(String::from),
        email: "meera@college.edu".to_string(),
        password: "hunter22".to_string(),
        confirm_password: "hunter22".to_string(),
    }
}

#[tokio::test]
async fn test_register_verify_login_logout() {
    let harness = TestHarness::new();
    let accounts = &harness.accounts;

    let notice = accounts.register(&registration(Some("Meera"))).await;
    assert_eq!(
        notice,
        Notice::success("Verification email sent! Please check your inbox and verify before logging in.")
    );
    assert_eq!(harness.identity.verification_emails(), vec!["meera@college.edu"]);

    let notice = accounts.login("meera@college.edu", "hunter22").await;
    assert_eq!(
        notice,
        Notice::error("Please verify your email before logging in. Check your inbox.")
    );
    assert_eq!(accounts.session().user_name().unwrap(), None);

    harness.identity.verify_email("meera@college.edu");
    let notice = accounts.login("meera@college.edu", "hunter22").await;
    assert_eq!(notice, Notice::success("Login successful! Redirecting..."));
    assert_eq!(accounts.session().user_name().unwrap().as_deref(), Some("Meera"));
    assert_eq!(accounts.display_username(), "Meera");

    let notice = accounts.logout().await;
    assert_eq!(notice, Notice::success("Logged out successfully."));
    assert_eq!(accounts.display_username(), DEFAULT_USERNAME);
}

#[tokio::test]
async fn test_register_without_username_uses_email_on_login() {
    let harness = TestHarness::new();
    harness.accounts.register(&registration(None)).await;
    harness.identity.verify_email("meera@college.edu");

    harness.accounts.login("meera@college.edu", "hunter22").await;
    assert_eq!(
        harness.accounts.session().user_name().unwrap().as_deref(),
        Some("meera")
    );
}

#[tokio::test]
async fn test_sign_in_state_observer() {
    let harness = TestHarness::with_identity(MockIdentity::new().with_account(
        "meera@college.edu",
        "hunter22",
        Some("Meera"),
        true,
    ));
    let mut observer = harness.accounts.state().subscribe();

    harness.accounts.login("meera@college.edu", "hunter22").await;
    observer.changed().await.unwrap();
    assert_eq!(
        observer.borrow().as_ref().and_then(|u| u.display_name.clone()),
        Some("Meera".to_string())
    );

    harness.accounts.logout().await;
    observer.changed().await.unwrap();
    assert!(observer.borrow().is_none());
}

#[tokio::test]
async fn test_password_reset_messages() {
    let harness = TestHarness::with_identity(MockIdentity::new().with_account(
        "meera@college.edu",
        "hunter22",
        None,
        true,
    ));

    assert_eq!(
        harness.accounts.reset_password("").await,
        Notice::info("Please enter your email to reset password.")
    );
    assert_eq!(
        harness.accounts.reset_password("meera@college").await,
        Notice::error("The email address is not valid.")
    );
    assert_eq!(
        harness.accounts.reset_password(" meera@college.edu ").await,
        Notice::success("Password reset email sent. Check your inbox!")
    );
}
