//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::KeyValueStorage;

/// An in-process key-value map.
///
/// Clones share the same underlying map. Used by tests and anywhere state
/// should not outlive the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), None);

        storage.set("k", "v1");
        assert_eq!(storage.get("k").as_deref(), Some("v1"));

        storage.set("k", "v2");
        assert_eq!(storage.get("k").as_deref(), Some("v2"));

        storage.remove("k");
        assert_eq!(storage.get("k"), None);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let storage = MemoryStorage::new();
        storage.remove("absent");
        assert_eq!(storage.get("absent"), None);
    }
}
