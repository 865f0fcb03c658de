mod credential;
mod identity;

pub use self::credential::{CredentialExchange, OwnerLogin};
pub use self::identity::IdentityHttpClient;
