//! Postgres connection pool and embedded migrations.

use anyhow::{anyhow, Context, Result};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

/// Migrations compiled from the `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .context("Failed to create database pool")
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().context("Failed to get database connection")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!("Failed to run migrations: {}", e))?;
    info!(count = applied.len(), "Database migrations applied");
    Ok(())
}

/// Liveness check used by the status endpoint.
pub fn ping(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().context("Failed to get database connection")?;
    diesel::sql_query("SELECT 1")
        .execute(&mut conn)
        .context("Database ping failed")?;
    Ok(())
}
