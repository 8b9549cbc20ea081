//! # Storage Migrations
//!
//! Embedded SQL migrations for the key-value table.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. Never modify an applied migration; add a new one

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::StorageResult;

/// Embedded at compile time from `migrations/sqlite`.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending migrations in filename order.
pub async fn run_migrations(pool: &SqlitePool) -> StorageResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)`.
///
/// A database that was never migrated reports zero applied; any other
/// query failure is returned.
pub async fn migration_status(pool: &SqlitePool) -> StorageResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let tracked: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    if tracked == 0 {
        debug!("No migrations table yet");
        return Ok((total, 0));
    }

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::sqlite::{SqliteStorage, StorageConfig};

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let storage = SqliteStorage::new(StorageConfig::in_memory()).await.unwrap();
        storage.run_migrations().await.unwrap();

        let (total, applied) = migration_status(storage.pool()).await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[tokio::test]
    async fn test_status_before_migrating() {
        let storage = SqliteStorage::new(StorageConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let (total, applied) = migration_status(storage.pool()).await.unwrap();
        assert!(total >= 1);
        assert_eq!(applied, 0);
    }

    #[tokio::test]
    async fn test_status_reports_query_failures() {
        let storage = SqliteStorage::new(StorageConfig::in_memory()).await.unwrap();
        storage.close().await;

        assert!(migration_status(storage.pool()).await.is_err());
    }
}
