//! Database migration commands.
//!
//! # Environment Variables
//!
//! - `POSTGRES_HOST`, `POSTGRES_PORT` - Server location (default localhost:5432)
//! - `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_DB` - Required
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded into the
//! binary at build time.

use sqlx::PgPool;
use sqlx::migrate::Migrate;

use favorites_api::config::{ConfigError, DatabaseConfig};
use favorites_api::db::MIGRATOR;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

async fn connect() -> Result<PgPool, MigrationError> {
    let config = DatabaseConfig::from_env()?;

    tracing::info!(host = %config.host, database = %config.name, "Connecting to database...");
    Ok(PgPool::connect_with(config.connect_options()).await?)
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    pool.close().await;
    Ok(())
}

/// Log every known migration and whether it has been applied.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is missing or the database is
/// unreachable.
pub async fn status() -> Result<(), MigrationError> {
    let pool = connect().await?;
    let mut conn = pool.acquire().await?;

    conn.ensure_migrations_table().await?;
    let applied = conn.list_applied_migrations().await?;

    for migration in MIGRATOR.iter() {
        let is_applied = applied.iter().any(|a| a.version == migration.version);
        tracing::info!(
            version = migration.version,
            description = %migration.description,
            applied = is_applied,
            "Migration"
        );
    }

    drop(conn);
    pool.close().await;
    Ok(())
}
