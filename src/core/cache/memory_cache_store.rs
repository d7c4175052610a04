use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::cache_store_trait::CacheStore;

/// Process-local cache used when no Redis URL is configured.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|(_, expires_at)| *expires_at > now)
            .count()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(value, _)| value.clone()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(key.to_string(), (value.to_string(), now + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::cache_store_trait::cache_key;

    #[tokio::test]
    async fn set_get_delete() {
        let store = MemoryCacheStore::new();
        let key = cache_key(&["test", "a"]);
        assert_eq!(key, "dhansaathi:test:a");

        store.set_ex(&key, "v", Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap().as_deref(), Some("v"));
        assert!(store.exists(&key).await.unwrap());

        store.delete(&key).await.unwrap();
        assert!(store.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_entries_are_invisible_and_purged() {
        let store = MemoryCacheStore::new();
        store.set_ex("short", "v", Duration::from_millis(10)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(store.get("short").await.unwrap().is_none());

        store.set_ex("long", "v", Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.entries.read().await.len(), 1);
        assert_eq!(store.len().await, 1);
    }
}
