//! Persisted list storage used for query history and recent tabs.
//!
//! [`ListStore`] is a minimal key-value API over JSON-serialisable lists.
//! [`MemoryStore`] keeps everything in process; applications provide a
//! persistent implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SearchError};

/// Key holding recently searched queries, most recent first.
pub const HISTORY_KEY: &str = "history";

/// Key holding recently activated tab ids, most recent first.
pub const RECENT_TABS_KEY: &str = "recentTabs";

/// Key-value storage of lists.
///
/// A missing key loads as an empty list.
pub trait ListStore: Send + Sync {
    /// Load the list stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Storage`] if the stored value is not a list of `T`
    /// or the backing storage cannot be read.
    fn load<T>(&self, key: &str) -> impl std::future::Future<Output = Result<Vec<T>>> + Send
    where
        T: DeserializeOwned + Send;

    /// Replace the list stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Storage`] if the items cannot be serialised or
    /// the backing storage cannot be written.
    fn save<T>(&self, key: &str, items: &[T]) -> impl std::future::Future<Output = Result<()>> + Send
    where
        T: Serialize + Sync;
}

/// In-memory [`ListStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListStore for MemoryStore {
    async fn load<T>(&self, key: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let value = self
            .values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned();
        match value {
            Some(value) => decode_list(key, value),
            None => Ok(Vec::new()),
        }
    }

    async fn save<T>(&self, key: &str, items: &[T]) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let value = encode_list(key, items)?;
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_owned(), value);
        Ok(())
    }
}

/// Decode a stored JSON value as a list of `T`.
///
/// # Errors
///
/// Returns [`SearchError::Storage`] naming `key` if the value does not fit.
pub fn decode_list<T: DeserializeOwned>(key: &str, value: serde_json::Value) -> Result<Vec<T>> {
    serde_json::from_value(value)
        .map_err(|e| SearchError::Storage(format!("{key} is not a valid list: {e}")))
}

/// Encode a list as a JSON value.
///
/// # Errors
///
/// Returns [`SearchError::Storage`] naming `key` if serialisation fails.
pub fn encode_list<T: Serialize>(key: &str, items: &[T]) -> Result<serde_json::Value> {
    serde_json::to_value(items)
        .map_err(|e| SearchError::Storage(format!("failed to encode {key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_loads_empty() {
        let store = MemoryStore::new();
        let items: Vec<String> = store.load(HISTORY_KEY).await.expect("load");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = MemoryStore::new();
        store
            .save(RECENT_TABS_KEY, &[3u64, 1, 2])
            .await
            .expect("save");
        let items: Vec<u64> = store.load(RECENT_TABS_KEY).await.expect("load");
        assert_eq!(items, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let store = MemoryStore::new();
        store.save(HISTORY_KEY, &["a".to_string()]).await.expect("save");
        let tabs: Vec<u64> = store.load(RECENT_TABS_KEY).await.expect("load");
        assert!(tabs.is_empty());
    }

    #[tokio::test]
    async fn wrong_type_is_a_storage_error() {
        let store = MemoryStore::new();
        store.save(HISTORY_KEY, &["not a number".to_string()]).await.expect("save");
        let err = store.load::<u64>(HISTORY_KEY).await.unwrap_err();
        assert!(matches!(err, SearchError::Storage(_)));
        assert!(err.to_string().contains("history"));
    }
}
