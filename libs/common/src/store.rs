//! JSON document store
//!
//! The whole datastore is one JSON document on disk. This module owns that
//! document: it parses it once at startup, hands out snapshot reads, and
//! funnels every mutation through a write lock so concurrent requests cannot
//! lose each other's updates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{StoreError, StoreResult};

/// Shared handle to the on-disk JSON document.
///
/// Cloning is cheap; every clone points at the same document and lock.
pub struct JsonStore<T> {
    inner: Arc<StoreInner<T>>,
}

struct StoreInner<T> {
    path: PathBuf,
    doc: RwLock<T>,
}

impl<T> Clone for JsonStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> JsonStore<T>
where
    T: Clone + Default + Serialize + DeserializeOwned + Send + Sync,
{
    /// Open the store at `path`.
    ///
    /// A missing file yields the default (empty) document; a file that does
    /// not parse is an error.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let doc = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::Parse)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No document at {}, starting empty", path.display());
                T::default()
            }
            Err(e) => return Err(StoreError::Read(e)),
        };

        Ok(Self {
            inner: Arc::new(StoreInner {
                path,
                doc: RwLock::new(doc),
            }),
        })
    }

    /// Run a closure against a read snapshot of the document.
    pub async fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let doc = self.inner.doc.read().await;
        f(&doc)
    }

    /// Apply a mutation to the document and persist it.
    ///
    /// The closure works on a copy. On `Ok` the copy is written to disk and
    /// swapped in; an `Err` from the closure leaves both memory and disk
    /// untouched, so a failed transition never half-applies.
    pub async fn transact<R, E>(&self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self.inner.doc.write().await;
        let mut updated = guard.clone();

        let out = f(&mut updated)?;

        self.persist(&updated).await.map_err(E::from)?;
        *guard = updated;

        Ok(out)
    }

    /// Serialize the document and atomically replace the file on disk.
    async fn persist(&self, doc: &T) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(doc).map_err(StoreError::Serialize)?;

        let tmp = self.inner.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(StoreError::Persist)?;
        tokio::fs::rename(&tmp, &self.inner.path)
            .await
            .map_err(StoreError::Persist)?;

        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        entries: Vec<String>,
    }

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("roster-store-{tag}-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn open_missing_file_starts_empty() {
        let path = temp_path("missing");

        let store: JsonStore<Doc> = JsonStore::open(&path).await.unwrap();
        let entries = store.read(|doc| doc.entries.len()).await;

        assert_eq!(entries, 0);
        assert!(!path.exists(), "opening alone must not create the file");
    }

    #[tokio::test]
    async fn transact_persists_and_reopens() {
        let path = temp_path("roundtrip");

        let store: JsonStore<Doc> = JsonStore::open(&path).await.unwrap();
        store
            .transact::<_, StoreError>(|doc| {
                doc.entries.push("first".to_string());
                doc.entries.push("second".to_string());
                Ok(())
            })
            .await
            .unwrap();
        drop(store);

        let reopened: JsonStore<Doc> = JsonStore::open(&path).await.unwrap();
        let entries = reopened.read(|doc| doc.entries.clone()).await;
        assert_eq!(entries, vec!["first".to_string(), "second".to_string()]);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn failed_transaction_changes_nothing() {
        let path = temp_path("rollback");

        let store: JsonStore<Doc> = JsonStore::open(&path).await.unwrap();
        store
            .transact::<_, StoreError>(|doc| {
                doc.entries.push("kept".to_string());
                Ok(())
            })
            .await
            .unwrap();

        let result = store
            .transact::<(), anyhow::Error>(|doc| {
                doc.entries.push("discarded".to_string());
                Err(anyhow::anyhow!("validation failed"))
            })
            .await;
        assert!(result.is_err());

        let entries = store.read(|doc| doc.entries.clone()).await;
        assert_eq!(entries, vec!["kept".to_string()]);

        // disk must match memory
        let reopened: JsonStore<Doc> = JsonStore::open(&path).await.unwrap();
        let on_disk = reopened.read(|doc| doc.entries.clone()).await;
        assert_eq!(on_disk, vec!["kept".to_string()]);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn open_rejects_corrupt_document() {
        let path = temp_path("corrupt");
        tokio::fs::write(&path, b"not json at all").await.unwrap();

        let result: StoreResult<JsonStore<Doc>> = JsonStore::open(&path).await;
        assert!(matches!(result, Err(StoreError::Parse(_))));

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
