mod role;
mod session;
mod user;

pub use self::role::{Role, UnknownRole};
pub use self::session::{Session, SessionSnapshot};
pub use self::user::User;
