//! # edubuddy-auth
//!
//! Email/password accounts for the EduBuddy portal.
//!
//! - `IdentityService`: the hosted identity provider, behind a trait
//! - `FirebaseIdentity`: REST client for the Identity Toolkit API
//! - `MockIdentity`: in-process provider for tests and offline use
//! - `AuthState`: observable sign-in state
//! - `SessionStore`: the locally persisted username
//! - `AccountService`: register, login, logout and password reset flows,
//!   each ending in a single user notice

pub mod account;
pub mod error;
pub mod firebase;
pub mod identity;
pub mod mock;
pub mod session;
pub mod state;

pub use account::{sign_out, AccountService, RegisterRequest, DEFAULT_USERNAME, MIN_PASSWORD_LEN};
pub use error::{AuthError, AuthErrorCode};
pub use firebase::{FirebaseIdentity, IdentityConfig};
pub use identity::{IdentityService, IdentityUser};
pub use mock::MockIdentity;
pub use session::SessionStore;
pub use state::AuthState;
