use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::warn;

use crate::core::cache::cache_store_trait::CacheStore;
use crate::core::client::llm::llm_client_trait::LlmClient;
use crate::core::client::llm::llm_provider::LlmProvider;
use crate::core::persistence::db::connection::{ping, DbPool};
use crate::core::util::blocking::run_blocking;

pub const SERVICE_NAME: &str = "dhansaathi-api";

pub struct SystemService {
    pool: Option<DbPool>,
    cache: Arc<dyn CacheStore>,
    llm: Arc<dyn LlmClient>,
    provider: LlmProvider,
}

impl SystemService {
    pub fn new(
        pool: Option<DbPool>,
        cache: Arc<dyn CacheStore>,
        llm: Arc<dyn LlmClient>,
        provider: LlmProvider,
    ) -> Self {
        Self { pool, cache, llm, provider }
    }

    pub async fn status(&self) -> Result<Value> {
        let database = match self.check_database().await {
            Ok(()) => "ok",
            Err(e) => {
                warn!(error = %e, "Database status check failed");
                "error"
            }
        };

        Ok(json!({
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
            "cache": self.cache.backend_name(),
            "llm": {
                "provider": self.provider,
                "model": self.llm.model(),
                "configured": self.llm.is_configured(),
            },
        }))
    }

    async fn check_database(&self) -> Result<()> {
        match &self.pool {
            Some(pool) => {
                let pool = pool.clone();
                run_blocking(move || ping(&pool)).await
            }
            None => Err(anyhow::anyhow!("no database pool")),
        }
    }
}
