use anyhow::Result;
use tracing::{error, info};

use crate::core::config::settings::{Settings, FALLBACK_SECRET_KEY};
use crate::core::persistence::db::connection::{create_pool, ping};
use crate::core::util::blocking::run_blocking;

/// Runs only when DHANSAATHI_DEBUG_MODE is set: report configuration and
/// check the database, then return so the process can exit.
pub async fn run_debug(settings: &Settings) -> Result<()> {
    info!("🔧 Debug mode: running debug tasks...");

    info!(
        database_url = %settings.masked_database_url(),
        pool_max_size = settings.db_pool_max_size,
        redis = settings.redis_url.is_some(),
        bind = %format!("{}:{}", settings.host, settings.port),
        token_minutes = settings.access_token_expire_minutes,
        fallback_secret = settings.secret_key == FALLBACK_SECRET_KEY,
        "Settings"
    );
    info!(
        provider = settings.llm.provider.as_code(),
        model = %settings.llm.model,
        base_url = %settings.llm.base_url(),
        api_key = %settings.llm.masked_api_key().unwrap_or_else(|| "<unset>".into()),
        "LLM settings"
    );

    let url = settings.database_url.clone();
    let max_size = settings.db_pool_max_size;
    match run_blocking(move || {
        let pool = create_pool(&url, max_size)?;
        ping(&pool)
    })
    .await
    {
        Ok(()) => info!("Database ping: ok"),
        Err(e) => error!(error = %e, "Database ping failed"),
    }

    info!("Debug tasks completed. Exiting...");
    Ok(())
}
