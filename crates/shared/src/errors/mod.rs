mod error;
mod http;
mod service;
mod storage;
mod token;

pub use self::error::ErrorResponse;
pub use self::http::HttpError;
pub use self::service::AuthError;
pub use self::storage::StorageError;
pub use self::token::TokenError;
