//! Observable sign-in state.

use tokio::sync::watch;

use crate::identity::IdentityUser;

/// Current signed-in user, published to any number of observers.
#[derive(Debug)]
pub struct AuthState {
    tx: watch::Sender<Option<IdentityUser>>,
}

impl AuthState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn current(&self) -> Option<IdentityUser> {
        self.tx.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Observe sign-in changes. The receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<IdentityUser>> {
        self.tx.subscribe()
    }

    pub fn set(&self, user: IdentityUser) {
        self.tx.send_replace(Some(user));
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}
