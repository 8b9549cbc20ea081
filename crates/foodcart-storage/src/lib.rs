//! # foodcart-storage: Key-Value Storage for Foodcart
//!
//! An origin-scoped, string-keyed, string-valued store with change
//! notifications, in the shape of a browser's local storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Foodcart Data Flow                               │
//! │                                                                         │
//! │  Storefront view A                 Storefront view B                    │
//! │  (CartStore.add_item)              (listening for changes)              │
//! │       │                                   ▲                             │
//! │       ▼                                   │ StorageEvent { key: "cart" }│
//! │  ┌────────────────────────────────────────┴────────────────────────┐   │
//! │  │                 foodcart-storage (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │ KeyValueStorage│   │ ChangeNotifier │   │  Migrations   │  │   │
//! │  │   │   (trait)      │──►│  (broadcast)   │   │  (embedded)   │  │   │
//! │  │   └───────┬────────┘   └────────────────┘   └───────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │     ┌─────┴──────┐                                              │   │
//! │  │     ▼            ▼                                              │   │
//! │  │  MemoryStorage  SqliteStorage                                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - The storage trait and its memory / SQLite backends
//! - [`event`] - Change events, view ids and subscriptions
//! - [`migrations`] - Embedded SQLite migrations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use foodcart_storage::{KeyValueStorage, SqliteStorage, StorageConfig};
//!
//! let storage = SqliteStorage::new(StorageConfig::new("foodcart.db")).await?;
//! storage.set_item("theme", "dark").await?;
//!
//! // A second view sees the change
//! let other = storage.open_view();
//! let mut events = other.subscribe();
//! storage.set_item("cart", "[]").await?;
//! let event = events.recv().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod event;
pub mod migrations;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::memory::MemoryStorage;
pub use backend::sqlite::{SqliteStorage, StorageConfig};
pub use backend::KeyValueStorage;
pub use error::{StorageError, StorageResult};
pub use event::{ChangeNotifier, StorageEvent, StorageEvents, ViewId};
