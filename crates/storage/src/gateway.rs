use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by document stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Durable key-value storage for whole-document JSON snapshots.
///
/// Each logical collection is one document under one key; writes replace the
/// entire document (last-writer-wins, no field-level merge).
pub trait DocumentStore: Send + Sync {
    /// Loads the raw document stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `document` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn save(&self, key: &str, document: &str) -> Result<(), StorageError>;

    /// Removes the document under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Loads and deserializes a document, substituting the default value when the
/// key is absent, the backend fails, or the document does not match the
/// expected shape. Load failures are logged, never propagated.
pub fn load_or_default<T>(store: &dyn DocumentStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    load_optional(store, key).unwrap_or_default()
}

/// Like [`load_or_default`], but for documents with no meaningful default
/// (absent and malformed both come back as `None`).
pub fn load_optional<T>(store: &dyn DocumentStore, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let raw = match store.load(key) {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(key, %err, "failed to load document, falling back to default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, %err, "malformed document, falling back to default");
            None
        }
    }
}

/// Serializes `value` and stores it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the backend write fails.
pub fn save_doc<T>(store: &dyn DocumentStore, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
{
    let raw = serde_json::to_string(value)?;
    store.save(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;

    #[test]
    fn load_or_default_on_missing_key() {
        let store = InMemoryStore::new();
        let value: Vec<String> = load_or_default(&store, "missing");
        assert!(value.is_empty());
    }

    #[test]
    fn load_or_default_on_malformed_document() {
        let store = InMemoryStore::new();
        store.save("bad", "{not json").unwrap();
        let value: Vec<String> = load_or_default(&store, "bad");
        assert!(value.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = InMemoryStore::new();
        save_doc(&store, "nums", &vec![1u32, 2, 3]).unwrap();
        let value: Vec<u32> = load_or_default(&store, "nums");
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn load_optional_distinguishes_absent() {
        let store = InMemoryStore::new();
        assert_eq!(load_optional::<u32>(&store, "nope"), None);
        save_doc(&store, "some", &7u32).unwrap();
        assert_eq!(load_optional::<u32>(&store, "some"), Some(7));
    }
}
