//! # Foodcart Storefront Library
//!
//! The page controller for the food-ordering storefront and the command-line
//! front end built on it.
//!
//! ## Module Organization
//! ```text
//! foodcart_storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── storefront.rs   ◄─── Storefront<S, P>: one page instance
//! ├── page.rs         ◄─── Page trait + HeadlessPage recorder
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore mirrored to storage
//! │   ├── theme.rs    ◄─── Saved theme preference
//! │   └── config.rs   ◄─── StorefrontConfig
//! ├── commands/
//! │   ├── mod.rs      ◄─── CLI parsing and dispatch
//! │   ├── menu.rs     ◄─── Catalog, menu, theme, navbar
//! │   └── cart.rs     ◄─── Cart and checkout commands
//! └── error.rs        ◄─── AppError for handlers
//! ```

pub mod commands;
pub mod error;
pub mod page;
pub mod state;
pub mod storefront;

use directories::ProjectDirs;
use foodcart_storage::{MemoryStorage, SqliteStorage, StorageConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use commands::{Cli, Command};
pub use error::{AppError, AppResult, ErrorCode};
pub use page::{Element, HeadlessPage, Page};
pub use state::{CartStore, LoadOutcome, StorefrontConfig};
pub use storefront::{CheckoutOutcome, Confirmation, Receipt, Storefront};

/// Runs one command and prints its output.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • StorefrontConfig::from_env (FOODCART_*)                           │
/// │                                                                         │
/// │  2. Open Storage ─────────────────────────────────────────────────────► │
/// │     • --memory: MemoryStorage                                           │
/// │     • otherwise SQLite (WAL), migrations applied                        │
/// │                                                                         │
/// │  3. Open the Page ────────────────────────────────────────────────────► │
/// │     • load cart, theme, badge, ETA, menu                                │
/// │                                                                         │
/// │  4. Run the Command, Print, Close Storage ────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = StorefrontConfig::from_env();
    let mut rng = rand::rng();

    let lines = if cli.memory {
        info!("Using in-memory storage");
        commands::execute(&cli.command, MemoryStorage::new(), config, &mut rng).await?
    } else {
        let db_path = get_database_path(&config)?;
        info!(?db_path, "Database path determined");

        let storage = SqliteStorage::new(StorageConfig::new(db_path)).await?;
        let result = commands::execute(&cli.command, storage.clone(), config, &mut rng).await;
        storage.close().await;
        result?
    };

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=foodcart=trace` - Show trace for foodcart crates only
/// - Default: `info,foodcart=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,foodcart=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the SQLite file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.foodcart.storefront/foodcart.db`
/// - **Windows**: `%APPDATA%\foodcart\storefront\data\foodcart.db`
/// - **Linux**: `~/.local/share/storefront/foodcart.db`
///
/// `FOODCART_DB_PATH` overrides the platform directory.
fn get_database_path(config: &StorefrontConfig) -> AppResult<PathBuf> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "foodcart", "storefront")
        .ok_or_else(|| AppError::config("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir).map_err(|e| {
        AppError::config(format!("Could not create {}: {}", data_dir.display(), e))
    })?;

    Ok(data_dir.join("foodcart.db"))
}
