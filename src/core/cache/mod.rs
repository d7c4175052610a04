pub mod cache_store_trait;
pub mod memory_cache_store;
pub mod redis_cache_store;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::core::config::settings::Settings;
use cache_store_trait::CacheStore;
use memory_cache_store::MemoryCacheStore;
use redis_cache_store::RedisCacheStore;

/// Pick the cache backend from configuration.
pub async fn build_cache_store(settings: &Settings) -> Result<Arc<dyn CacheStore>> {
    match &settings.redis_url {
        Some(url) => {
            let store = RedisCacheStore::connect(url).await?;
            info!("Cache backend: redis");
            Ok(Arc::new(store))
        }
        None => {
            info!("Cache backend: memory (REDIS_URL not set)");
            Ok(Arc::new(MemoryCacheStore::new()))
        }
    }
}
