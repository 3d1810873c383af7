//! TTL-keyed response cache backed by a persistent `fjall` keyspace.
//!
//! Entries carry their absolute expiry timestamp; expired entries are
//! deleted on read. The cache is owned by application state and passed
//! to callers explicitly.

use anyhow::{Result, anyhow};
use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: u64, // Unix timestamp (seconds)
}

/// Persistent TTL cache. Cloning shares the underlying keyspace.
#[derive(Clone)]
pub struct TtlCache {
    store: Keyspace,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

impl TtlCache {
    /// Open (or create) the cache at the given directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let store = db.keyspace("cache", fjall::KeyspaceCreateOptions::default)?;
        Ok(TtlCache { store })
    }

    /// Stores a serializable value with a time-to-live.
    #[tracing::instrument(name = "cache_put", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = SystemTime::now()
            .checked_add(ttl)
            .ok_or(anyhow!("TTL overflow"))?
            .duration_since(UNIX_EPOCH)?
            .as_secs();
        let entry = StoredEntry { value, expires_at };
        let bytes = postcard::to_stdvec(&entry)?;

        let _ = task::spawn_blocking(move || store.insert(key, bytes)).await?;
        Ok(())
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "cache_get", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key_bytes)).await??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("Key not found");
            return Ok(None);
        };

        let entry: StoredEntry<T> = postcard::from_bytes(&bytes)?;
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        if now < entry.expires_at {
            tracing::debug!("Key found and still fresh");
            Ok(Some(entry.value))
        } else {
            tracing::debug!("Key found but expired");
            self.remove(key).await?;
            Ok(None)
        }
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        let _ = task::spawn_blocking(move || store.remove(key)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache(label: &str) -> TtlCache {
        let dir = std::env::temp_dir().join(format!(
            "egotrip-cache-test-{label}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        TtlCache::open(&dir).expect("cache opens in temp dir")
    }

    #[tokio::test]
    async fn test_put_then_get_roundtrip() {
        let cache = temp_cache("roundtrip");
        cache
            .put("greeting", "hello".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        let value: Option<String> = cache.get("greeting").await.unwrap();
        assert_eq!(value, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_miss_returns_none() {
        let cache = temp_cache("miss");
        let value: Option<String> = cache.get("absent").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_dropped() {
        let cache = temp_cache("expiry");
        cache
            .put("ephemeral", 42u32, Duration::from_secs(0))
            .await
            .unwrap();

        // Zero TTL expires immediately
        tokio::time::sleep(Duration::from_millis(1100)).await;
        let value: Option<u32> = cache.get("ephemeral").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = temp_cache("remove");
        cache
            .put("key", 7u32, Duration::from_secs(60))
            .await
            .unwrap();
        cache.remove("key").await.unwrap();
        let value: Option<u32> = cache.get("key").await.unwrap();
        assert!(value.is_none());
    }
}
