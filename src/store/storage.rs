use super::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Durable byte store addressed by string keys
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key`
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn write(&self, key: &str, value: &[u8]) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

/// One JSON file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, value).await?;
        tokio::fs::rename(&temp_path, &path).await?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local storage, useful for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value stored under `key`
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.lock().insert(key.into(), value.into());
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.get(key))
    }

    async fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_storage_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("nested"));

        assert!(storage.read("movie-store").await.unwrap().is_none());

        storage.write("movie-store", b"{\"a\":1}").await.unwrap();
        assert_eq!(
            storage.read("movie-store").await.unwrap().as_deref(),
            Some(&b"{\"a\":1}"[..])
        );
        assert!(temp_dir.path().join("nested/movie-store.json").exists());
        assert!(!temp_dir.path().join("nested/movie-store.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_storage_overwrite_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.write("k", b"one").await.unwrap();
        storage.write("k", b"two").await.unwrap();
        assert_eq!(storage.read("k").await.unwrap().as_deref(), Some(&b"two"[..]));

        storage.remove("k").await.unwrap();
        assert!(storage.read("k").await.unwrap().is_none());
        storage.remove("k").await.unwrap();
    }

    #[test]
    fn test_keys_are_sanitized() {
        let storage = FileStorage::new("/data");
        assert_eq!(storage.path_for("../evil key"), PathBuf::from("/data/___evil_key.json"));
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();

        storage.write("k", b"v").await.unwrap();
        assert_eq!(storage.read("k").await.unwrap(), Some(b"v".to_vec()));

        storage.remove("k").await.unwrap();
        assert!(storage.get("k").is_none());
    }
}
