use crate::abstract_trait::KeyValueStore;
use parking_lot::Mutex;
use shared::errors::StorageError;
use std::collections::HashMap;

/// Ephemeral storage for tests and embedders that want nothing on disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn write_batch(&self, entries: &[(&str, Option<String>)]) -> Result<(), StorageError> {
        let mut slots = self.slots.lock();
        for (key, value) in entries {
            match value {
                Some(value) => {
                    slots.insert((*key).to_string(), value.clone());
                }
                None => {
                    slots.remove(*key);
                }
            }
        }
        Ok(())
    }
}
