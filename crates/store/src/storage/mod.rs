//! Synchronous key-value persistence.
//!
//! The stores treat their backing storage the way browser code treats local
//! storage: a flat, always-available map of string keys to string values.
//! [`MemoryStorage`] keeps everything in process memory (tests, ephemeral
//! sessions); [`JsonFileStorage`] mirrors the map into a JSON file so state
//! survives across runs.
//!
//! Reads never fail: a missing or unparseable value is reported as absent and
//! the typed helpers substitute an empty default. Writes are fire-and-forget.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A synchronous string key-value store.
///
/// Implementations must be cheap to clone so the identity and cart stores can
/// share one underlying map, mirroring how both halves of the original demo
/// share the same browser storage.
pub trait KeyValueStorage: Clone {
    /// Read the raw value under `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Delete the value under `key`, if present.
    fn remove(&self, key: &str);
}

/// Read and deserialize the JSON value under `key`.
///
/// Absent keys and corrupt values both degrade to `T::default()`; corruption
/// is logged but never surfaced to the caller.
pub fn read_json_or_default<T, S>(storage: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStorage,
{
    storage.get(key).map_or_else(T::default, |raw| {
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(key, %err, "corrupt value in storage, substituting default");
            T::default()
        })
    })
}

/// Serialize `value` as JSON and write it under `key`.
pub fn write_json<T, S>(storage: &S, key: &str, value: &T)
where
    T: Serialize,
    S: KeyValueStorage,
{
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(err) => tracing::warn!(key, %err, "failed to serialize value, skipping write"),
    }
}
