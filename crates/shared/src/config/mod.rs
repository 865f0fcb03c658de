mod jwt;
mod myconfig;

pub use self::jwt::{TokenClaims, TokenInspector};
pub use self::myconfig::Config;
