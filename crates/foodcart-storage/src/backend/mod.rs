//! # Storage Backends
//!
//! The [`KeyValueStorage`] trait and its two implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KeyValueStorage                                                        │
//! │                                                                         │
//! │   get_item(key)         → Option<String>                                │
//! │   set_item(key, value)  → publishes StorageEvent if the value changed   │
//! │   remove_item(key)      → publishes StorageEvent if the key existed     │
//! │   open_view()           → another handle on the same data, new ViewId   │
//! │   subscribe()           → changes made by *other* views                 │
//! │                                                                         │
//! │   MemoryStorage   HashMap behind a mutex, gone on exit                  │
//! │   SqliteStorage   local_storage table, survives restarts                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod memory;
pub mod sqlite;

use std::future::Future;

use crate::error::StorageResult;
use crate::event::{StorageEvents, ViewId};

/// A string-keyed, string-valued store shared by every view of one origin.
///
/// Handles are cheap to clone; each one created through [`open_view`]
/// carries its own [`ViewId`] so it never hears about its own writes.
///
/// [`open_view`]: KeyValueStorage::open_view
pub trait KeyValueStorage: Send + Sync {
    /// Id of the view this handle writes as.
    fn view_id(&self) -> ViewId;

    /// Another view over the same data.
    fn open_view(&self) -> Self
    where
        Self: Sized;

    /// Changes made through other views.
    fn subscribe(&self) -> StorageEvents;

    fn get_item(&self, key: &str) -> impl Future<Output = StorageResult<Option<String>>> + Send;

    fn set_item(&self, key: &str, value: &str) -> impl Future<Output = StorageResult<()>> + Send;

    /// Removing an absent key is a no-op.
    fn remove_item(&self, key: &str) -> impl Future<Output = StorageResult<()>> + Send;
}
