use shared::errors::StorageError;
use std::sync::Arc;

pub type DynKeyValueStore = Arc<dyn KeyValueStore + Send + Sync>;

/// Client-local durable key-value storage.
pub trait KeyValueStore: std::fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Apply every entry or none of them. `None` removes the key.
    fn write_batch(&self, entries: &[(&str, Option<String>)]) -> Result<(), StorageError>;

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let entries: Vec<(&str, Option<String>)> = keys.iter().map(|k| (*k, None)).collect();
        self.write_batch(&entries)
    }
}
