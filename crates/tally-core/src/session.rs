//! # Session Module
//!
//! The logged-in user's token and profile as an explicit value.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Session::anonymous() ──► login(token, user) ──► logged in            │
//! │          ▲                                          │                   │
//! │          │                                          │ authorization_    │
//! │          │                                          │ header() used by  │
//! │          │                                          │ request builders  │
//! │          └──────────────── logout() ◄───────────────┘                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is owned by whoever performs authenticated calls and passed
//! to them by reference. Persisting it between launches is the storage
//! layer's job; the type is `Serialize`/`Deserialize` for that.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Profile of the logged-in user, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Authentication state for API calls.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    /// A session with nobody logged in.
    pub fn anonymous() -> Self {
        Session::default()
    }

    /// Starts a session after a successful login.
    pub fn login(token: impl Into<String>, user: Option<UserProfile>) -> Self {
        Session {
            token: Some(token.into()),
            user,
        }
    }

    /// Clears token and user.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// True when a non-empty token is held.
    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// `Bearer <token>`, or `None` when logged out.
    pub fn authorization_header(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {}", t))
    }

    /// Like [`Session::authorization_header`] but fails when logged out.
    pub fn require_authorization(&self) -> CoreResult<String> {
        self.authorization_header().ok_or(CoreError::NotLoggedIn)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            id: 1,
            name: "Amina".to_string(),
            email: "amina@example.com".to_string(),
        }
    }

    #[test]
    fn test_anonymous_has_no_header() {
        let session = Session::anonymous();
        assert!(!session.is_logged_in());
        assert_eq!(session.authorization_header(), None);
        assert!(matches!(
            session.require_authorization(),
            Err(CoreError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_login_then_logout() {
        let mut session = Session::login("abc123", Some(user()));
        assert!(session.is_logged_in());
        assert_eq!(session.authorization_header().as_deref(), Some("Bearer abc123"));
        assert_eq!(session.user().map(|u| u.id), Some(1));

        session.logout();
        assert!(!session.is_logged_in());
        assert_eq!(session.authorization_header(), None);
        assert!(session.user().is_none());
    }

    #[test]
    fn test_empty_token_is_not_logged_in() {
        let session = Session::login("", None);
        assert!(!session.is_logged_in());
        assert_eq!(session.authorization_header(), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::login("secret-token", None);
        let printed = format!("{:?}", session);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }
}
