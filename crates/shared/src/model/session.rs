use crate::model::{Role, User};
use serde::{Deserialize, Serialize};

/// The persisted (token, user) pair.
///
/// A `Session` is always complete: there is no way to hold a token without
/// its user or the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            refresh_token: None,
            user,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: Option<String>) -> Self {
        self.refresh_token = refresh_token;
        self
    }
}

/// What `SessionStore::get` hands to callers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl SessionSnapshot {
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            user: Some(session.user.clone()),
            is_authenticated: true,
        }
    }
}
