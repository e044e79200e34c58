//! File-backed storage backend.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::KeyValueStorage;

/// A key-value map mirrored into a single JSON file.
///
/// The whole map is rewritten after every `set`/`remove`, matching the
/// synchronous write-through behavior of browser local storage. A missing or
/// unparseable file starts the map empty; write failures are logged and
/// otherwise ignored.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    cache: Arc<Mutex<BTreeMap<String, String>>>,
}

impl JsonFileStorage {
    /// Open (or start) the map persisted at `path`.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = load(&path);
        Self {
            path,
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// The file this storage persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn flush(&self, cache: &BTreeMap<String, String>) {
        let json = match serde_json::to_string_pretty(cache) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(%err, "failed to serialize storage map, skipping write");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), %err, "failed to write storage file");
        }
    }
}

fn load(path: &Path) -> BTreeMap<String, String> {
    let Ok(raw) = std::fs::read_to_string(path) else {
        return BTreeMap::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "corrupt storage file, starting empty");
        BTreeMap::new()
    })
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut cache = self.lock();
        cache.insert(key.to_owned(), value.to_owned());
        self.flush(&cache);
    }

    fn remove(&self, key: &str) {
        let mut cache = self.lock();
        cache.remove(key);
        self.flush(&cache);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::open(dir.path().join("data.json"));
        assert_eq!(storage.get("users"), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let storage = JsonFileStorage::open(&path);
        storage.set("users", "[]");
        storage.set("cart", "[1,2]");
        drop(storage);

        let reopened = JsonFileStorage::open(&path);
        assert_eq!(reopened.get("users").as_deref(), Some("[]"));
        assert_eq!(reopened.get("cart").as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{{{{not json").unwrap();

        let storage = JsonFileStorage::open(&path);
        assert_eq!(storage.get("users"), None);
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let storage = JsonFileStorage::open(&path);
        storage.set("k", "v");
        storage.remove("k");
        drop(storage);

        let reopened = JsonFileStorage::open(&path);
        assert_eq!(reopened.get("k"), None);
    }
}
