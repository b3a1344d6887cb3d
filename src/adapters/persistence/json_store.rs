//! Implements KeyValueStore using a JSON file.
//!
//! Holds credentials, the login-form flag and the last timeline as one `{key: value}` object.

use crate::domain::DomainError;
use crate::ports::KeyValueStore;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// JSON file-based key-value storage.
pub struct JsonFileStore {
    path: PathBuf,
    cache: tokio::sync::RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(BTreeMap::new()),
        }
    }

    /// Load the store from disk. A missing or corrupt file yields an empty store.
    ///
    /// # Errors
    /// `DomainError::Store` when the file exists but cannot be read.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "store file corrupt, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(DomainError::Store(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        *self.cache.write().await = data;
        Ok(())
    }

    /// Write-replace save: temp file, `sync_all`, then rename over the target,
    /// so a crash mid-write leaves the previous file intact.
    /// Callers hold the cache write lock, which serializes saves.
    async fn save(&self, data: &BTreeMap<String, String>) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| DomainError::Store(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Store(format!("create store dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let res = Self::write_replace(&temp_path, &self.path, json.as_bytes()).await;
        if res.is_err() {
            if let Err(e) = fs::remove_file(&temp_path).await {
                if e.kind() != ErrorKind::NotFound {
                    warn!(path = %temp_path.display(), error = %e, "failed to remove temp file");
                }
            }
        }
        res
    }

    async fn write_replace(temp_path: &Path, path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
        let mut f = fs::File::create(temp_path)
            .await
            .map_err(|e| DomainError::Store(format!("create temp file: {}", e)))?;
        f.write_all(bytes)
            .await
            .map_err(|e| DomainError::Store(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Store(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(temp_path, path)
            .await
            .map_err(|e| DomainError::Store(format!("atomic rename failed: {}", e)))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.cache.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        let mut cache = self.cache.write().await;
        cache.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save(&cache).await {
            warn!(key, error = %e, "failed to persist store");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = JsonFileStore::new(&path);
        store.load().await.unwrap();
        assert_eq!(store.get("Hydro-username").await, None);
        store.set("Hydro-username", "alice").await;
        store.set("showForm", "false").await;

        let reopened = JsonFileStore::new(&path);
        reopened.load().await.unwrap();
        assert_eq!(reopened.get("Hydro-username").await.as_deref(), Some("alice"));
        assert_eq!(reopened.get("showForm").await.as_deref(), Some("false"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        store.load().await.unwrap();
        assert_eq!(store.get("anything").await, None);

        store.set("k", "v").await;
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"k\": \"v\""));
    }

    #[tokio::test]
    async fn test_unreadable_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::create_dir(&path).unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, DomainError::Store(_)));
    }

    #[tokio::test]
    async fn test_failed_save_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        // rename cannot replace a non-empty directory
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "x").unwrap();

        let store = JsonFileStore::new(&path);
        store.set("k", "v").await;

        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.is_dir());
        assert_eq!(store.get("k").await.as_deref(), Some("v"));
    }
}
