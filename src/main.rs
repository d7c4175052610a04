use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use dhansaathi_api::app_state::build_app_state_with_pool;
use dhansaathi_api::core::cache::build_cache_store;
use dhansaathi_api::core::client::llm::chat_completions_client::ChatCompletionsClient;
use dhansaathi_api::core::config::settings::Settings;
use dhansaathi_api::core::persistence::db::connection::{create_pool, run_migrations};
use dhansaathi_api::core::util::blocking::run_blocking;
use dhansaathi_api::debug::run_debug;
use dhansaathi_api::logging::init_logging;
use dhansaathi_api::routes::app_router;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // logging first so configuration warnings are captured
    let log_dir = std::env::var("DHANSAATHI_LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let _guard = match init_logging(&log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run().await {
        error!(error = %format!("{e:#}"), "Fatal error");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let settings = Arc::new(Settings::from_env()?);

    if settings.debug_mode {
        return run_debug(&settings).await;
    }

    info!("dhansaathi-api {} starting", env!("CARGO_PKG_VERSION"));

    let url = settings.database_url.clone();
    let max_size = settings.db_pool_max_size;
    let pool = run_blocking(move || {
        let pool = create_pool(&url, max_size)?;
        run_migrations(&pool)?;
        Ok(pool)
    })
    .await?;

    let cache = build_cache_store(&settings).await?;
    let llm = Arc::new(ChatCompletionsClient::new(settings.llm.clone())?);
    if settings.llm.api_key.is_none() {
        info!("LLM_API_KEY not set; insights will be unavailable");
    }

    let state = build_app_state_with_pool(settings.clone(), pool, cache, llm);
    let app = app_router().with_state(state);

    let addr = settings.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("dhansaathi-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
