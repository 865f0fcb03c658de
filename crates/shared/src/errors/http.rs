use thiserror::Error;

/// Transport-level failure talking to the identity endpoint.
///
/// The wrapped string is the server's `{message}` where one was sent, so it
/// can be shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    Internal(String),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl HttpError {
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => HttpError::BadRequest(message),
            401 => HttpError::Unauthorized(message),
            403 => HttpError::Forbidden(message),
            404 => HttpError::NotFound(message),
            409 => HttpError::Conflict(message),
            502..=504 => HttpError::ServiceUnavailable(message),
            _ => HttpError::Internal(message),
        }
    }
}
