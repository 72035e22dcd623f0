//! # Session State
//!
//! Holds the explicit [`Session`] for the editor's lifetime. Login replaces
//! it, logout clears it; request builders read it through this handle
//! instead of any global storage.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tally_core::session::UserProfile;
use tally_core::Session;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    /// Starts logged out.
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Starts with an existing session, e.g. one restored by the storage layer.
    pub fn with_session(session: Session) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub fn login(&self, token: impl Into<String>, user: Option<UserProfile>) {
        *self.lock() = Session::login(token, user);
    }

    pub fn logout(&self) {
        self.lock().logout();
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let state = SessionState::new();
        assert!(!state.snapshot().is_logged_in());

        state.login("tok", None);
        assert_eq!(
            state.snapshot().authorization_header().as_deref(),
            Some("Bearer tok")
        );

        state.logout();
        assert!(!state.snapshot().is_logged_in());
    }
}
