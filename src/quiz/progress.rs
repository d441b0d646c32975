// src/quiz/progress.rs

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Storage key for the generation credential.
pub const API_KEY: &str = "geminiApiKey";

/// Storage key for the cumulative score, serialized as a decimal string.
pub const TOTAL_SCORE: &str = "totalScore";

/// Key-value persistence for progress that outlives a quiz session.
///
/// The browser client kept this in local storage; the controller only
/// needs `get`/`set`. Writes happen synchronously after each mutating
/// operation, and there is no clear operation.
pub trait ProgressStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Volatile store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Store backed by one JSON object file, the process-local stand-in for
/// browser local storage.
///
/// Reads happen once at open; every `set` writes the whole file back.
/// A missing or unreadable file opens as empty, and a failed write is
/// logged rather than surfaced, matching local-storage semantics where
/// persistence failures never interrupt the session.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("Progress file {} is not valid JSON: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, values }
    }

    fn persist(&self) {
        let contents = match serde_json::to_string_pretty(&self.values) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!("Failed to serialize progress: {}", e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, contents) {
            tracing::error!("Failed to write progress file {}: {}", self.path.display(), e);
        }
    }
}

impl ProgressStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("progress_{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_store_round_trips_values() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get(TOTAL_SCORE), None);

        store.set(TOTAL_SCORE, "50");
        store.set(TOTAL_SCORE, "120");
        assert_eq!(store.get(TOTAL_SCORE).as_deref(), Some("120"));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = temp_path();

        let mut store = JsonFileStore::open(&path);
        store.set(API_KEY, "secret");
        store.set(TOTAL_SCORE, "50");
        drop(store);

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(API_KEY).as_deref(), Some("secret"));
        assert_eq!(reopened.get(TOTAL_SCORE).as_deref(), Some("50"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_opens_empty_when_file_is_missing() {
        let store = JsonFileStore::open(temp_path());
        assert_eq!(store.get(API_KEY), None);
    }

    #[test]
    fn test_file_store_opens_empty_on_garbage_contents() {
        let path = temp_path();
        fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get(TOTAL_SCORE), None);

        fs::remove_file(&path).unwrap();
    }
}
