//! Database access for the adboard service.
//!
//! The service holds the entity collections in memory (they are replaced
//! wholesale from upstream on every load cycle), so the database stores
//! only what must survive restarts: per-user UI preference blobs.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared connection pool alias used across the workspace.
pub type DbPool = PgPool;

/// Create a connection pool and connect eagerly.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Create a pool without connecting. Connections are established on
/// first use; tests that never touch the database rely on this.
pub fn create_pool_lazy(database_url: &str) -> Result<DbPool, sqlx::Error> {
    Ok(PgPoolOptions::new()
        .max_connections(2)
        .connect_lazy(database_url)?)
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from the embedded `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
