//! # SQLite Storage
//!
//! Persistent key-value storage in a single `local_storage` table.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SQLite Key-Value Store                             │
//! │                                                                         │
//! │  StorageConfig::new(path) ← Configure pool settings                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStorage::new(config).await ← Create pool + run migrations       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────┐                              │
//! │  │ local_storage                        │                              │
//! │  │  key TEXT PK │ value TEXT │ updated_at│                              │
//! │  │  "cart"      │ "[{..}]"   │ 2026-..   │                              │
//! │  │  "theme"     │ "dark"     │ 2026-..   │                              │
//! │  └──────────────────────────────────────┘                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  open_view() shares the pool and the notifier                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Notifications only reach views opened from the same `SqliteStorage`.
//! Another process writing the same file is not observed.

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, trace};

use super::KeyValueStorage;
use crate::error::{StorageError, StorageResult};
use crate::event::{ChangeNotifier, StorageEvent, StorageEvents, ViewId};
use crate::migrations;

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Storage configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StorageConfig::new("/path/to/foodcart.db")
///     .max_connections(2)
///     .run_migrations(true);
/// ```
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 4
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// `None` keeps connections open forever.
    pub idle_timeout: Option<Duration>,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl StorageConfig {
    /// Creates a configuration for the given file. The file is created if
    /// it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StorageConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// In-memory database (for testing).
    ///
    /// The single connection is never recycled; closing it would drop
    /// every stored key.
    pub fn in_memory() -> Self {
        StorageConfig {
            database_path: PathBuf::from(MEMORY_PATH),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }

    fn connect_options(&self) -> StorageResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StorageError::ConnectionFailed(e.to_string()));
        }

        let connect_url = format!("sqlite://{}?mode=rwc", self.database_path.display());
        let options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?
            // Readers don't block the writer
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);
        Ok(options)
    }
}

// =============================================================================
// Storage
// =============================================================================

/// SQLite-backed [`KeyValueStorage`].
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
    notifier: ChangeNotifier,
    view: ViewId,
}

impl SqliteStorage {
    /// Opens the pool and, unless disabled, applies pending migrations.
    pub async fn new(config: StorageConfig) -> StorageResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening key-value storage"
        );

        let connect_options = config.connect_options()?;
        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);
        if config.is_in_memory() {
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Storage pool created"
        );

        let storage = SqliteStorage {
            pool,
            notifier: ChangeNotifier::new(),
            view: ViewId::new(),
        };

        if config.run_migrations {
            storage.run_migrations().await?;
        }

        Ok(storage)
    }

    /// Applies pending migrations. Safe to call repeatedly.
    pub async fn run_migrations(&self) -> StorageResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of stored keys.
    pub async fn len(&self) -> StorageResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM local_storage")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the pool. Every handle sharing it fails afterwards.
    pub async fn close(&self) {
        info!("Closing key-value storage");
        self.pool.close().await;
    }
}

impl KeyValueStorage for SqliteStorage {
    fn view_id(&self) -> ViewId {
        self.view
    }

    fn open_view(&self) -> Self {
        SqliteStorage {
            pool: self.pool.clone(),
            notifier: self.notifier.clone(),
            view: ViewId::new(),
        }
    }

    fn subscribe(&self) -> StorageEvents {
        self.notifier.subscribe(self.view)
    }

    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM local_storage WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut tx = self.pool.begin().await?;

        let old: Option<String> =
            sqlx::query_scalar("SELECT value FROM local_storage WHERE key = ?")
                .bind(key)
                .fetch_optional(&mut *tx)
                .await?;

        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        trace!(view = %self.view, key, "set_item");

        if old.as_deref() != Some(value) {
            self.notifier.publish(StorageEvent::changed(
                self.view,
                key,
                old,
                Some(value.to_string()),
            ));
        }
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> StorageResult<()> {
        let old: Option<String> =
            sqlx::query_scalar("DELETE FROM local_storage WHERE key = ? RETURNING value")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        if let Some(old) = old {
            trace!(view = %self.view, key, "remove_item");
            self.notifier
                .publish(StorageEvent::changed(self.view, key, Some(old), None));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage() -> SqliteStorage {
        SqliteStorage::new(StorageConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_storage() {
        let storage = storage().await;
        assert!(storage.health_check().await);
        assert_eq!(storage.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let storage = storage().await;
        storage.set_item("theme", "light").await.unwrap();
        storage.set_item("theme", "dark").await.unwrap();

        assert_eq!(storage.get_item("theme").await.unwrap().as_deref(), Some("dark"));
        assert_eq!(storage.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let storage = storage().await;
        storage.set_item("cart", "[]").await.unwrap();
        storage.remove_item("cart").await.unwrap();
        storage.remove_item("cart").await.unwrap();

        assert_eq!(storage.get_item("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_views_share_pool_and_events() {
        let a = storage().await;
        let b = a.open_view();
        let mut events = b.subscribe();

        a.set_item("cart", "[]").await.unwrap();
        assert_eq!(b.get_item("cart").await.unwrap().as_deref(), Some("[]"));

        let event = events.try_recv().unwrap();
        assert_eq!(event.origin, Some(a.view_id()));

        // Same value again: no event
        a.set_item("cart", "[]").await.unwrap();
        assert!(events.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_file_storage_survives_reopen() {
        let path = std::env::temp_dir().join(format!("foodcart-{}.db", uuid::Uuid::new_v4()));

        let storage = SqliteStorage::new(StorageConfig::new(&path)).await.unwrap();
        storage.set_item("payment", "Card").await.unwrap();
        storage.close().await;

        let reopened = SqliteStorage::new(StorageConfig::new(&path)).await.unwrap();
        assert_eq!(
            reopened.get_item("payment").await.unwrap().as_deref(),
            Some("Card")
        );
        reopened.close().await;

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_builder() {
        let config = StorageConfig::new("/tmp/test.db")
            .max_connections(8)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 8);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(StorageConfig::in_memory().is_in_memory());
    }
}
