//! Explicit session context.
//!
//! A `Session` is created once when the host starts, handed to whatever
//! needs to know who is reporting, and cleared on sign-out. Nothing reads
//! login state from a global.

use chrono::{DateTime, Utc};

/// Who is using the reporter right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: Option<String>,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Start a session. Blank user names start an anonymous session.
    #[must_use]
    pub fn start(user: Option<String>) -> Self {
        let user = user
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        tracing::debug!(user = user.as_deref().unwrap_or("anonymous"), "Session started");
        Self {
            user,
            started_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::start(None)
    }

    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Sign in as `user`, replacing any current user.
    pub fn sign_in(&mut self, user: impl Into<String>) {
        let user = user.into();
        tracing::debug!(%user, "Signed in");
        self.user = Some(user);
    }

    /// Clear the signed-in user. Safe to call on an anonymous session.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::debug!(%user, "Signed out");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_user_is_anonymous() {
        let session = Session::start(Some("   ".to_string()));
        assert!(!session.is_signed_in());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_sign_out_clears_user() {
        let mut session = Session::start(Some("ada".to_string()));
        assert_eq!(session.user(), Some("ada"));

        session.sign_out();
        assert!(!session.is_signed_in());

        session.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_sign_in_replaces_user() {
        let mut session = Session::anonymous();
        session.sign_in("grace");
        assert_eq!(session.user(), Some("grace"));
    }
}
