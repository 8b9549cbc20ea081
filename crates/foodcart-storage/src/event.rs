//! # Change Notifications
//!
//! When one view writes a key, every *other* view sharing the same backend
//! receives a [`StorageEvent`]. The writer never sees its own events.
//!
//! ## Delivery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Change Notification Flow                             │
//! │                                                                         │
//! │  View A: set_item("cart", ..)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ChangeNotifier.publish(event { origin: A })                           │
//! │       │                                                                 │
//! │       ├──► StorageEvents (view A) ── origin == A → skipped             │
//! │       ├──► StorageEvents (view B) ── delivered → reload cart + badge   │
//! │       └──► StorageEvents (view C) ── delivered                          │
//! │                                                                         │
//! │  Lagged receiver → one resync event (key: None) → reload everything    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Delivery is advisory: no locking, last writer wins.

use chrono::{DateTime, Utc};
use std::fmt;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::warn;
use uuid::Uuid;

/// Buffered events per subscriber before it is considered lagging.
const EVENT_CAPACITY: usize = 256;

// =============================================================================
// View Id
// =============================================================================

/// Identifies one open view (a browser tab, in page terms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(Uuid);

impl ViewId {
    pub fn new() -> Self {
        ViewId(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        ViewId::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Storage Event
// =============================================================================

/// A change made through another view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Changed key; `None` means "anything may have changed".
    pub key: Option<String>,
    pub old_value: Option<String>,
    /// `None` when the key was removed.
    pub new_value: Option<String>,
    /// View that made the change; `None` for synthetic resync events.
    pub origin: Option<ViewId>,
    pub at: DateTime<Utc>,
}

impl StorageEvent {
    /// A single key changed.
    pub fn changed(
        origin: ViewId,
        key: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        StorageEvent {
            key: Some(key.to_string()),
            old_value,
            new_value,
            origin: Some(origin),
            at: Utc::now(),
        }
    }

    /// Missed events; the receiver must reload everything it cares about.
    pub fn resync() -> Self {
        StorageEvent {
            key: None,
            old_value: None,
            new_value: None,
            origin: None,
            at: Utc::now(),
        }
    }

    /// Whether a view caching `key` must reload.
    pub fn affects(&self, key: &str) -> bool {
        self.key.as_deref().map_or(true, |k| k == key)
    }
}

// =============================================================================
// Notifier
// =============================================================================

/// Fan-out of storage events to every view of one backend.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<StorageEvent>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        ChangeNotifier { tx }
    }

    /// Publishes an event. Having no subscribers is not an error.
    pub fn publish(&self, event: StorageEvent) {
        let _ = self.tx.send(event);
    }

    /// Subscribes on behalf of `view`; its own events are filtered out.
    pub fn subscribe(&self, view: ViewId) -> StorageEvents {
        StorageEvents {
            rx: self.tx.subscribe(),
            view,
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        ChangeNotifier::new()
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Events for one view.
#[derive(Debug)]
pub struct StorageEvents {
    rx: broadcast::Receiver<StorageEvent>,
    view: ViewId,
}

impl StorageEvents {
    /// Waits for the next change made by another view.
    ///
    /// Returns `None` once every storage handle has been dropped.
    pub async fn recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.origin == Some(self.view) => continue,
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(missed)) => {
                    warn!(view = %self.view, missed, "Storage event receiver lagged");
                    return Some(StorageEvent::resync());
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns a pending change without waiting.
    pub fn try_recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if event.origin == Some(self.view) => continue,
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(missed)) => {
                    warn!(view = %self.view, missed, "Storage event receiver lagged");
                    return Some(StorageEvent::resync());
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_events_are_skipped() {
        let notifier = ChangeNotifier::new();
        let a = ViewId::new();
        let b = ViewId::new();
        let mut events_a = notifier.subscribe(a);
        let mut events_b = notifier.subscribe(b);

        notifier.publish(StorageEvent::changed(a, "cart", None, Some("[]".into())));

        assert!(events_a.try_recv().is_none());
        let event = events_b.try_recv().unwrap();
        assert_eq!(event.key.as_deref(), Some("cart"));
        assert_eq!(event.origin, Some(a));
    }

    #[test]
    fn test_lagged_receiver_gets_resync() {
        let notifier = ChangeNotifier::new();
        let writer = ViewId::new();
        let mut events = notifier.subscribe(ViewId::new());

        for i in 0..(EVENT_CAPACITY + 10) {
            notifier.publish(StorageEvent::changed(writer, "cart", None, Some(i.to_string())));
        }

        let event = events.try_recv().unwrap();
        assert!(event.key.is_none());
        assert!(event.affects("cart"));
        assert!(event.affects("theme"));
    }

    #[test]
    fn test_affects() {
        let event = StorageEvent::changed(ViewId::new(), "theme", None, Some("dark".into()));
        assert!(event.affects("theme"));
        assert!(!event.affects("cart"));
    }

    #[tokio::test]
    async fn test_recv_waits_for_other_views() {
        let notifier = ChangeNotifier::new();
        let me = ViewId::new();
        let other = ViewId::new();
        let mut events = notifier.subscribe(me);

        notifier.publish(StorageEvent::changed(me, "cart", None, Some("[]".into())));
        notifier.publish(StorageEvent::changed(other, "eta", None, Some("25 min".into())));

        let event = events.recv().await.unwrap();
        assert_eq!(event.key.as_deref(), Some("eta"));
    }

    #[tokio::test]
    async fn test_recv_ends_when_notifier_dropped() {
        let notifier = ChangeNotifier::new();
        let mut events = notifier.subscribe(ViewId::new());
        drop(notifier);

        assert!(events.recv().await.is_none());
    }
}
