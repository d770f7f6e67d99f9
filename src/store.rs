//! Record Store
//!
//! Injected persistence for per-permission request records. The tracker
//! never touches global state; hosts pick an implementation (or bring
//! their own, e.g. one backed by SharedPreferences over JNI).
//!
//! Reads and writes are synchronous; the tracker is single-threaded and
//! no concurrent writers are expected.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PermError, Result};
use crate::record::RequestRecord;

/// Key-value store for request records.
///
/// Unknown keys default to [`RequestRecord::First`]. Implementations must
/// keep writes monotonic; [`RequestRecord::advance_to`] does the clamping.
pub trait RecordStore {
    /// Look up the record for a permission key.
    fn get(&self, key: &str) -> RequestRecord;

    /// Advance the record for a permission key. Regressions are ignored.
    fn put(&mut self, key: &str, record: RequestRecord);

    /// Persist pending writes, if the store is durable.
    fn flush(&mut self) -> Result<()>;
}

/// In-memory store for tests and hosts without durable state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, RequestRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> RequestRecord {
        self.records.get(key).copied().unwrap_or_default()
    }

    fn put(&mut self, key: &str, record: RequestRecord) {
        let current = self.get(key);
        self.records.insert(key.to_string(), current.advance_to(record));
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// On-disk file format
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    /// Format version for migrations
    version: u32,
    records: HashMap<String, RequestRecord>,
}

/// TOML-file-backed store, persisted for the life of the install.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: HashMap<String, RequestRecord>,
    dirty: bool,
}

impl FileStore {
    const FORMAT_VERSION: u32 = 1;

    /// Get the default store file path
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "droidperms", "DroidPerms")
            .map(|dirs| dirs.data_dir().join("records.toml"))
    }

    /// Open a store at the default path.
    pub fn open_default() -> Result<Self> {
        let path = Self::default_path()
            .ok_or_else(|| PermError::Store("Cannot determine store path".into()))?;
        Self::open(path)
    }

    /// Open a store file, creating an empty one on first use.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let records = if path.exists() {
            debug!("Loading records from {:?}", path);
            let contents = std::fs::read_to_string(&path)?;
            let file: StoreFile = toml::from_str(&contents)?;
            file.records
        } else {
            info!("Record store not found at {:?}, starting empty", path);
            HashMap::new()
        };

        Ok(Self {
            path,
            records,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = StoreFile {
            version: Self::FORMAT_VERSION,
            records: self.records.clone(),
        };
        let contents = toml::to_string_pretty(&file)?;
        std::fs::write(&self.path, contents)?;

        debug!("Records saved to {:?}", self.path);
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn get(&self, key: &str) -> RequestRecord {
        self.records.get(key).copied().unwrap_or_default()
    }

    fn put(&mut self, key: &str, record: RequestRecord) {
        let current = self.get(key);
        let next = current.advance_to(record);
        if next != current || !self.records.contains_key(key) {
            self.records.insert(key.to_string(), next);
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.save()?;
            self.dirty = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults_to_first() {
        let store = MemoryStore::new();
        assert_eq!(store.get("android.permission.CAMERA"), RequestRecord::First);
    }

    #[test]
    fn test_memory_store_put_never_regresses() {
        let mut store = MemoryStore::new();
        store.put("p", RequestRecord::DontAsk);
        store.put("p", RequestRecord::Seen);
        assert_eq!(store.get("p"), RequestRecord::DontAsk);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.toml");

        let mut store = FileStore::open(&path).unwrap();
        assert!(store.is_empty());
        store.put("android.permission.CAMERA", RequestRecord::Seen);
        store.put("android.permission.READ_CONTACTS", RequestRecord::DontAsk);
        store.flush().unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(
            reopened.get("android.permission.CAMERA"),
            RequestRecord::Seen
        );
        assert_eq!(
            reopened.get("android.permission.READ_CONTACTS"),
            RequestRecord::DontAsk
        );
        assert_eq!(reopened.get("android.permission.VIBRATE"), RequestRecord::First);
    }

    #[test]
    fn test_file_store_flush_without_writes_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.toml");

        let mut store = FileStore::open(&path).unwrap();
        store.flush().unwrap();
        assert!(!path.exists());
    }
}
