//! JSON-file backed [`ListStore`].
//!
//! All lists live in one JSON object keyed by list name (`history`,
//! `recentTabs`). Every save rewrites the file through a temporary sibling
//! and a rename, so a crash never leaves a half-written store behind.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tabscout_search::store::{decode_list, encode_list};
use tabscout_search::{ListStore, SearchError};
use tokio::sync::Mutex;

/// A [`ListStore`] persisted to a single JSON file.
///
/// Clones share the file and its lock.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                lock: Mutex::new(()),
            }),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>, SearchError> {
        let content = match tokio::fs::read_to_string(self.path()).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(SearchError::Storage(format!(
                    "failed to read {}: {e}",
                    self.path().display()
                )));
            }
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            SearchError::Storage(format!("{} is not a JSON object: {e}", self.path().display()))
        })
    }

    async fn write_all(&self, values: &Map<String, Value>) -> Result<(), SearchError> {
        let storage = |e: std::io::Error| {
            SearchError::Storage(format!("failed to write {}: {e}", self.path().display()))
        };
        if let Some(parent) = self.path().parent() {
            tokio::fs::create_dir_all(parent).await.map_err(storage)?;
        }
        let json = serde_json::to_vec_pretty(values)
            .map_err(|e| SearchError::Storage(format!("failed to encode store: {e}")))?;
        let tmp = self.path().with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(storage)?;
        tokio::fs::rename(&tmp, self.path()).await.map_err(storage)?;
        Ok(())
    }
}

impl ListStore for JsonFileStore {
    async fn load<T>(&self, key: &str) -> tabscout_search::Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let _guard = self.inner.lock.lock().await;
        let mut values = self.read_all().await?;
        match values.remove(key) {
            Some(value) => decode_list(key, value),
            None => Ok(Vec::new()),
        }
    }

    async fn save<T>(&self, key: &str, items: &[T]) -> tabscout_search::Result<()>
    where
        T: Serialize + Sync,
    {
        let value = encode_list(key, items)?;
        let _guard = self.inner.lock.lock().await;
        let mut values = self.read_all().await?;
        values.insert(key.to_owned(), value);
        self.write_all(&values).await?;
        tracing::debug!(key, items = items.len(), "list saved");
        Ok(())
    }
}
