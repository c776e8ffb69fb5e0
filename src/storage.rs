use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// Flat key-value namespace used for persistence. Each key holds one JSON
/// document that is read and written whole on every mutation.
pub mod keys {
    pub const RECIPES: &str = "recipes";
    pub const REVIEWS: &str = "recipe-reviews";
    pub const RATINGS: &str = "recipe-ratings";
    pub const PHOTOS: &str = "user-recipe-photos";
    pub const PHOTO_COMMENTS: &str = "photo-comments";
    pub const CURRENT_USER: &str = "current-user";
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn read(&self, key: &str) -> anyhow::Result<Option<Value>>;
    async fn write(&self, key: &str, value: Value) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// Typed front over a [`KeyValueStore`] backend.
///
/// Mutation paths grab the guard from [`Store::begin_mutation`] for the whole
/// read-modify-write step, including any derived recomputation, so dependent
/// state is never observable half-updated.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn begin_mutation(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match self.backend.read(key).await? {
            Some(value) => {
                let parsed = serde_json::from_value(value)
                    .with_context(|| format!("deserialize key {key}"))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn get_or_default<T: DeserializeOwned + Default>(
        &self,
        key: &str,
    ) -> anyhow::Result<T> {
        Ok(self.get(key).await?.unwrap_or_default())
    }

    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let value = serde_json::to_value(value).with_context(|| format!("serialize key {key}"))?;
        self.backend.write(key, value).await
    }

    pub async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.backend.remove(key).await
    }
}

/// Production backend: one `<key>.json` file per namespace key under the
/// configured data directory, with an in-memory copy for reads.
pub struct JsonFileStore {
    dir: PathBuf,
    cache: RwLock<HashMap<String, Value>>,
}

impl JsonFileStore {
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir).with_context(|| format!("create data dir {dir:?}"))?;

        let mut cache = HashMap::new();
        for entry in std::fs::read_dir(dir).with_context(|| format!("read data dir {dir:?}"))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let bytes = std::fs::read(&path).with_context(|| format!("read {path:?}"))?;
            let value: Value =
                serde_json::from_slice(&bytes).with_context(|| format!("parse {path:?}"))?;
            cache.insert(key.to_string(), value);
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            cache: RwLock::new(cache),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn read(&self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.cache.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let bytes = serde_json::to_vec_pretty(&value)?;
        let mut cache = self.cache.write().await;
        tokio::fs::write(self.path_for(key), bytes)
            .await
            .with_context(|| format!("persist key {key}"))?;
        cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut cache = self.cache.write().await;
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).with_context(|| format!("remove key {key}")),
        }
        cache.remove(key);
        Ok(())
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryStore {
    cache: RwLock<HashMap<String, Value>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.cache.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: Value) -> anyhow::Result<()> {
        self.cache.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.cache.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod storage_tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = Store::new(Arc::new(MemoryStore::default()));

        assert_eq!(store.get::<Vec<String>>("missing").await.unwrap(), None);
        let empty: Vec<String> = store.get_or_default("missing").await.unwrap();
        assert!(empty.is_empty());

        store.put("names", &vec!["a".to_string()]).await.unwrap();
        let names: Vec<String> = store.get("names").await.unwrap().unwrap();
        assert_eq!(names, vec!["a".to_string()]);

        store.remove("names").await.unwrap();
        assert_eq!(store.get::<Vec<String>>("names").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_file_store_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = Store::new(Arc::new(JsonFileStore::open(dir.path()).unwrap()));
            store.put(keys::RECIPES, &vec![1, 2, 3]).await.unwrap();
        }

        let reopened = Store::new(Arc::new(JsonFileStore::open(dir.path()).unwrap()));
        let values: Vec<i32> = reopened.get(keys::RECIPES).await.unwrap().unwrap();
        assert_eq!(values, vec![1, 2, 3]);

        reopened.remove(keys::RECIPES).await.unwrap();
        let reopened_again = Store::new(Arc::new(JsonFileStore::open(dir.path()).unwrap()));
        assert_eq!(
            reopened_again.get::<Vec<i32>>(keys::RECIPES).await.unwrap(),
            None
        );
    }
}
