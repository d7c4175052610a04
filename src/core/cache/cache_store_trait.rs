use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

pub const KEY_PREFIX: &str = "dhansaathi";

/// Key/value store with per-entry expiry, shared by sessions and insights.
#[async_trait]
pub trait CacheStore: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

pub fn cache_key(parts: &[&str]) -> String {
    let mut key = String::from(KEY_PREFIX);
    for part in parts {
        key.push(':');
        key.push_str(part);
    }
    key
}
