//! # In-Memory Storage
//!
//! A process-local map. Used by tests and by `--memory` runs of the CLI.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use super::KeyValueStorage;
use crate::error::StorageResult;
use crate::event::{ChangeNotifier, StorageEvent, StorageEvents, ViewId};

/// Shared map plus notifier; every view clones the `Arc`.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    notifier: ChangeNotifier,
    view: ViewId,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            entries: Arc::new(Mutex::new(HashMap::new())),
            notifier: ChangeNotifier::new(),
            view: ViewId::new(),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn swap(&self, key: &str, value: Option<&str>) -> Option<String> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match value {
            Some(value) => entries.insert(key.to_string(), value.to_string()),
            None => entries.remove(key),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        MemoryStorage::new()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn view_id(&self) -> ViewId {
        self.view
    }

    fn open_view(&self) -> Self {
        MemoryStorage {
            entries: Arc::clone(&self.entries),
            notifier: self.notifier.clone(),
            view: ViewId::new(),
        }
    }

    fn subscribe(&self) -> StorageEvents {
        self.notifier.subscribe(self.view)
    }

    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let old = self.swap(key, Some(value));
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
        if let Some(old) = self.swap(key, None) {
            trace!(view = %self.view, key, "remove_item");
            self.notifier
                .publish(StorageEvent::changed(self.view, key, Some(old), None));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("cart").await.unwrap(), None);

        storage.set_item("cart", "[]").await.unwrap();
        assert_eq!(storage.get_item("cart").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("cart").await.unwrap();
        assert_eq!(storage.get_item("cart").await.unwrap(), None);
        assert!(storage.is_empty());

        // Removing again is fine
        storage.remove_item("cart").await.unwrap();
    }

    #[tokio::test]
    async fn test_views_share_data() {
        let a = MemoryStorage::new();
        let b = a.open_view();
        assert_ne!(a.view_id(), b.view_id());

        a.set_item("theme", "dark").await.unwrap();
        assert_eq!(b.get_item("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_other_view_is_notified() {
        let a = MemoryStorage::new();
        let b = a.open_view();
        let mut events_a = a.subscribe();
        let mut events_b = b.subscribe();

        a.set_item("cart", "[1]").await.unwrap();

        assert!(events_a.try_recv().is_none());
        let event = events_b.try_recv().unwrap();
        assert_eq!(event.key.as_deref(), Some("cart"));
        assert_eq!(event.old_value, None);
        assert_eq!(event.new_value.as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_unchanged_value_is_silent() {
        let a = MemoryStorage::new();
        let b = a.open_view();
        a.set_item("theme", "dark").await.unwrap();

        let mut events = b.subscribe();
        a.set_item("theme", "dark").await.unwrap();
        a.remove_item("missing").await.unwrap();
        assert!(events.try_recv().is_none());

        a.remove_item("theme").await.unwrap();
        let event = events.try_recv().unwrap();
        assert_eq!(event.old_value.as_deref(), Some("dark"));
        assert_eq!(event.new_value, None);
    }
}
