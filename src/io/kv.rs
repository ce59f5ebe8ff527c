use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Storage key for the active task collection.
pub const TASKS_KEY: &str = "bb2.tasks";
/// Storage key for the archive collection.
pub const ARCHIVE_KEY: &str = "bb2.archive";
/// Storage key for the next task ID counter.
pub const NEXT_ID_KEY: &str = "bb2.nextId";
/// Storage key for the daily-goal log.
pub const GOALS_KEY: &str = "bb2.goals";
/// Storage key for the last date a daily goal was recorded.
pub const LAST_GOAL_DATE_KEY: &str = "bb2.lastGoalDate";
/// Storage key for the free-text feedback note.
pub const FEEDBACK_KEY: &str = "bb2.feedback";

/// Error type for key-value persistence
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("store rejected write for key {0}")]
    Rejected(String),
}

/// String-keyed persistence port. Values are JSON-encoded strings.
///
/// Saves are best-effort: callers log failures and carry on, so an
/// implementation must never leave previously stored data unreadable
/// after a failed write.
pub trait KvStore {
    /// Load the value for `key`, or `None` if absent or unreadable.
    fn load(&self, key: &str) -> Option<String>;
    /// Persist `value` under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), KvError>;
}

/// File-backed store: one `<key>.json` file per key in a data directory.
#[derive(Debug)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: PathBuf) -> Self {
        FileKvStore { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileKvStore {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), KvError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| KvError::WriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(&path, value).map_err(|e| KvError::WriteError { path, source: e })
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemKvStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemKvStore {
    pub fn new() -> Self {
        MemKvStore::default()
    }
}

impl KvStore for MemKvStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load and decode a JSON value, treating missing or corrupt data as absent.
pub fn load_json<T: serde::de::DeserializeOwned>(kv: &dyn KvStore, key: &str) -> Option<T> {
    let raw = kv.load(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "ignoring unreadable stored value");
            None
        }
    }
}

/// Encode and save a JSON value, logging (not surfacing) any failure.
pub fn save_json<T: serde::Serialize>(kv: &dyn KvStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, error = %e, "could not encode value for persistence");
            return;
        }
    };
    if let Err(e) = kv.save(key, &raw) {
        warn!(key, error = %e, "could not persist value");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path().to_path_buf());
        store.save(TASKS_KEY, "[1,2,3]").unwrap();
        assert_eq!(store.load(TASKS_KEY).as_deref(), Some("[1,2,3]"));
        assert!(dir.path().join("bb2.tasks.json").exists());
    }

    #[test]
    fn file_store_missing_key_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path().to_path_buf());
        assert!(store.load("bb2.absent").is_none());
    }

    #[test]
    fn file_store_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path().join("nested"));
        store.save(FEEDBACK_KEY, "\"note\"").unwrap();
        assert_eq!(store.load(FEEDBACK_KEY).as_deref(), Some("\"note\""));
    }

    #[test]
    fn mem_store_round_trip() {
        let store = MemKvStore::new();
        assert!(store.load(ARCHIVE_KEY).is_none());
        store.save(ARCHIVE_KEY, "[]").unwrap();
        assert_eq!(store.load(ARCHIVE_KEY).as_deref(), Some("[]"));
    }
}
