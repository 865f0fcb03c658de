mod identity;
mod navigator;
mod storage;

pub use self::identity::{DynIdentityClient, IdentityClientTrait};
pub use self::navigator::{DynNavigator, Navigator};
pub use self::storage::{DynKeyValueStore, KeyValueStore};
