use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::core::cache::cache_store_trait::{cache_key, CacheStore};
use crate::core::security::jwt::AccessClaims;

/// Token revocation list on top of the cache store.
#[derive(Clone)]
pub struct SessionService {
    cache: Arc<dyn CacheStore>,
}

impl SessionService {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    /// Keep the entry only as long as the token could still verify.
    pub async fn revoke(&self, claims: &AccessClaims) -> Result<()> {
        let ttl = Duration::from_secs(claims.remaining_secs().max(1) as u64);
        self.cache
            .set_ex(&revoked_key(&claims.jti), &claims.user_id.to_string(), ttl)
            .await?;
        info!(user_id = claims.user_id, "Access token revoked");
        Ok(())
    }

    pub async fn is_revoked(&self, jti: &str) -> Result<bool> {
        self.cache.exists(&revoked_key(jti)).await
    }
}

fn revoked_key(jti: &str) -> String {
    cache_key(&["revoked", jti])
}
