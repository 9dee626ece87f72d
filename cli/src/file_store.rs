use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use minigolf_core::{KeyValueStore, StoreError};

/// A key/value store kept as a single JSON object on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                StoreError::Unavailable(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(unavailable(&self.path, e)),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(unavailable(&self.path, e)),
                _ => Ok(()),
            };
        }
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| unavailable(&self.path, e))
    }
}

fn unavailable(path: &std::path::Path, e: io::Error) -> StoreError {
    StoreError::Unavailable(format!("{}: {}", path.display(), e))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        // An unreadable file is replaced rather than blocking the write.
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all().unwrap_or_default();
        entries.remove(key);
        self.write_all(&entries)
    }
}
