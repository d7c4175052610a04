use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "dhansaathi_api=info,tower_http=info";

/// Console plus daily-rolling file output. Keep the guard alive until exit
/// so buffered file lines are flushed.
pub fn init_logging(log_dir: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir).with_context(|| format!("Failed to create log dir {log_dir}"))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "dhansaathi.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
