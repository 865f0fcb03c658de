mod file;
mod memory;
mod session;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::session::{REFRESH_TOKEN_SLOT, SessionStore, TOKEN_SLOT, USER_SLOT};
