//! Shared selection state
//!
//! Several console views care about "the currently selected city" (the hotel
//! list filters by it, the address form defaults to it). The selection lives
//! in one process-wide store; views subscribe for changes instead of passing
//! the value around.

use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// Process-wide shared selection of one resource id
///
/// Writes are identity-guarded: setting the already-current value is a no-op
/// and wakes no subscriber, which keeps subscriber-triggered re-selection
/// from cycling.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    tx: Arc<watch::Sender<Option<Uuid>>>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Change the selection; returns true when the value actually changed
    pub fn select(&self, id: Option<Uuid>) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == id {
                return false;
            }
            *current = id;
            true
        })
    }

    pub fn current(&self) -> Option<Uuid> {
        *self.tx.borrow()
    }

    /// Subscribe to selection changes
    pub fn subscribe(&self) -> watch::Receiver<Option<Uuid>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_select_and_read() {
        let store = SelectionStore::new();
        assert_eq!(store.current(), None);

        let id = Uuid::new_v4();
        assert!(store.select(Some(id)));
        assert_eq!(store.current(), Some(id));
    }

    #[tokio::test]
    async fn test_redundant_select_is_a_no_op() {
        let store = SelectionStore::new();
        let id = Uuid::new_v4();

        assert!(store.select(Some(id)));
        assert!(!store.select(Some(id)));

        let mut rx = store.subscribe();
        rx.mark_unchanged();
        store.select(Some(id));
        assert!(!rx.has_changed().expect("sender alive"));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = SelectionStore::new();
        let mut rx = store.subscribe();
        rx.mark_unchanged();

        let id = Uuid::new_v4();
        store.select(Some(id));
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), Some(id));
    }

    #[tokio::test]
    async fn test_clones_share_selection() {
        let store = SelectionStore::new();
        let clone = store.clone();
        let id = Uuid::new_v4();

        store.select(Some(id));
        assert_eq!(clone.current(), Some(id));

        clone.select(None);
        assert_eq!(store.current(), None);
    }
}
