//! String-keyed JSON value storage.
//!
//! Every persisted collection lives under a well-known key as a single JSON
//! document. The backend is swappable: [`MemoryKvStore`] for tests and
//! ephemeral sessions, [`FileKvStore`] for durable on-disk state.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Domain(#[from] bigbike_core::DomainError),
}

/// Raw key/value backend. Values are opaque JSON strings; typed stores own
/// the schema of what lives under each key.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads the document under `key`, falling back to `T::default()` when the
/// key is absent or holds malformed JSON. Corrupt state is never an error
/// surfaced to callers; the collection simply starts over.
pub async fn load_or_default<T>(kv: &dyn KvStore, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let raw = kv.get(key).await?;
    Ok(raw
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_default())
}

pub async fn save<T>(kv: &dyn KvStore, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
{
    let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    kv.put(key, encoded).await
}

/// In-memory backend. State is lost on drop.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// File-backed backend: one `<key>.json` document per key under a data
/// directory. Writes go through a temp file and rename so a crash never
/// leaves a half-written document behind.
#[derive(Debug)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.ensure_dir().await?;
        let target = self.path_for(key);
        let staging = self.root.join(format!("{key}.json.tmp"));
        tokio::fs::write(&staging, value).await?;
        tokio::fs::rename(&staging, &target).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Backend with read latency, for exercising interleaved writers.

    use std::time::Duration;

    use async_trait::async_trait;

    use super::{KvStore, MemoryKvStore, StoreError};

    #[derive(Debug, Default)]
    pub(crate) struct SlowReadKv {
        inner: MemoryKvStore,
    }

    impl SlowReadKv {
        pub(crate) fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl KvStore for SlowReadKv {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
            self.inner.put(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips_values() {
        let kv = MemoryKvStore::new();
        kv.put("wishlist", "[\"yamaha-r1\"]".to_string())
            .await
            .expect("put");
        assert_eq!(
            kv.get("wishlist").await.expect("get").as_deref(),
            Some("[\"yamaha-r1\"]")
        );
        kv.remove("wishlist").await.expect("remove");
        assert_eq!(kv.get("wishlist").await.expect("get"), None);
    }

    #[tokio::test]
    async fn file_store_round_trips_and_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let kv = FileKvStore::new(dir.path());
            kv.put("bookings", "[]".to_string()).await.expect("put");
        }
        let reopened = FileKvStore::new(dir.path());
        assert_eq!(
            reopened.get("bookings").await.expect("get").as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn file_store_missing_key_is_none_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let kv = FileKvStore::new(dir.path());
        assert_eq!(kv.get("viewedBikes").await.expect("get"), None);
        kv.remove("viewedBikes").await.expect("remove absent key");
    }

    #[tokio::test]
    async fn corrupt_document_decodes_to_the_empty_collection() {
        let kv = MemoryKvStore::new();
        kv.put("wishlist", "{not json".to_string()).await.expect("put");
        let decoded: Vec<String> = load_or_default(&kv, "wishlist").await.expect("load");
        assert!(decoded.is_empty());
    }
}
