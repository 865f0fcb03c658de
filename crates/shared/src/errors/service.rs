use crate::errors::StorageError;
use thiserror::Error;

/// Everything a login, signup or logout can fail with.
///
/// `Display` is the single user-visible notification text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    AccountBlocked(String),

    #[error("{0}")]
    NotFoundOrUnauthorized(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    NetworkOrServer(String),

    #[error("Session changed while the request was in flight")]
    Superseded,

    #[error("A request is already in progress")]
    RequestPending,

    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn blocked() -> Self {
        AuthError::AccountBlocked("Your account has been blocked".to_string())
    }
}
