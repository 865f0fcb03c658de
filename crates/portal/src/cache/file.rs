use crate::abstract_trait::KeyValueStore;
use parking_lot::Mutex;
use shared::errors::StorageError;
use std::{collections::BTreeMap, fs, io::ErrorKind, path::PathBuf};
use tracing::{debug, warn};

/// Durable storage backed by a single JSON object on disk.
///
/// Every batch rewrites the whole file through a temp file and a rename, so a
/// reader sees either the old slots or the new ones.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|_| StorageError::Corrupt(self.path.display().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, slots: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(slots)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!("Wrote {} slot(s) to {}", slots.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn write_batch(&self, entries: &[(&str, Option<String>)]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();

        let mut slots = match self.read_all() {
            Ok(slots) => slots,
            Err(StorageError::Corrupt(path)) => {
                warn!("Discarding unreadable session file {path}");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };

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

        self.write_all(&slots)
    }
}
