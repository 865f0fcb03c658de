use thiserror::Error;

/// Why a token could not be read. Never leaves the inspector: callers only
/// see "no valid session".
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        TokenError::Malformed(error.to_string())
    }
}
