//! Session Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated session issued by the auth service
///
/// Holding a `Session` is the proof that a user signed in. The tokens are
/// opaque to the client and only forwarded to the document store and feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Backend user id, also the id of the user's profile document
    pub uid: String,
    pub email: String,
    /// Bearer token for document and feed requests
    pub id_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(uid: impl Into<String>, email: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            id_token: id_token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Name shown in greetings: the part of the email before `@`
    pub fn display_name(&self) -> &str {
        let name = crate::util::email_local_part(&self.email);
        if name.is_empty() { "Usuario" } else { name }
    }

    /// Whether the id token is past its expiry (sessions without expiry never expire)
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_display_name() {
        let session = Session::new("u1", "ana.lopez@hostee.com", "t");
        assert_eq!(session.display_name(), "ana.lopez");

        let session = Session::new("u1", "", "t");
        assert_eq!(session.display_name(), "Usuario");
    }

    #[test]
    fn test_is_expired() {
        let session = Session::new("u1", "a@b.c", "t");
        assert!(!session.is_expired());

        let past = session.clone().with_expires_at(Utc::now() - Duration::seconds(5));
        assert!(past.is_expired());

        let future = session.with_expires_at(Utc::now() + Duration::hours(1));
        assert!(!future.is_expired());
    }
}
