//! Discussion store.
//!
//! Holds the discussion view-state and the last viewed issuance per office.
//! State changes go through [`DiscussionStore::dispatch`] and a pure reducer;
//! observers get a `watch` receiver from [`DiscussionStore::subscribe`] and
//! see every new snapshot.

use std::collections::BTreeMap;

use tokio::sync::watch;

use crate::discussion::{Discussion, DiscussionState};

/// Actions understood by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// A load was started
    LoadStarted,
    /// A discussion arrived
    Loaded(Discussion),
    /// The load failed
    LoadFailed,
    /// The office has no discussion right now
    NotAvailable,
    /// Forget the current discussion
    Reset,
    /// The discussion issued at `issuance_time` by `office` was shown to the user
    DiscussionViewed {
        office: String,
        issuance_time: String,
    },
}

/// Snapshot of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Current discussion view-state
    pub discussion: DiscussionState,
    /// Office -> issuance time of the last viewed discussion
    pub viewed: BTreeMap<String, String>,
}

impl StoreState {
    /// Apply an action.
    pub fn reduce(&mut self, action: StoreAction) {
        match action {
            StoreAction::LoadStarted => self.discussion = DiscussionState::Pending,
            StoreAction::Loaded(discussion) => {
                self.discussion = DiscussionState::Loaded(discussion)
            }
            StoreAction::LoadFailed => self.discussion = DiscussionState::Failed,
            StoreAction::NotAvailable => self.discussion = DiscussionState::NotAvailable,
            StoreAction::Reset => self.discussion = DiscussionState::Missing,
            StoreAction::DiscussionViewed {
                office,
                issuance_time,
            } => {
                self.viewed.insert(office, issuance_time);
            }
        }
    }
}

/// Observable store for the discussion view-state.
#[derive(Debug)]
pub struct DiscussionStore {
    tx: watch::Sender<StoreState>,
}

impl Default for DiscussionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscussionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_state(StoreState::default())
    }

    /// Create a store seeded with previously persisted viewed issuances.
    pub fn with_viewed(viewed: BTreeMap<String, String>) -> Self {
        Self::with_state(StoreState {
            viewed,
            ..StoreState::default()
        })
    }

    fn with_state(state: StoreState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx }
    }

    /// Dispatch an action and notify subscribers.
    pub fn dispatch(&self, action: StoreAction) {
        tracing::debug!(?action, "dispatch");
        self.tx.send_modify(|state| state.reduce(action));
    }

    /// Subscribe to state changes.
    ///
    /// The receiver sees the current snapshot immediately and is notified on
    /// every dispatch. Dropping it unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Clone of the current snapshot.
    pub fn state(&self) -> StoreState {
        self.tx.borrow().clone()
    }

    /// Current discussion view-state.
    pub fn discussion(&self) -> DiscussionState {
        self.tx.borrow().discussion.clone()
    }

    /// Issuance time of the last viewed discussion for `office`.
    pub fn viewed_issuance(&self, office: &str) -> Option<String> {
        self.tx.borrow().viewed.get(office).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discussion() -> Discussion {
        Discussion::new(".FIRE...\nDry.", "KPQR", "2024-05-01T15:42:00+00:00")
    }

    #[test]
    fn test_initial_state_is_missing() {
        let store = DiscussionStore::new();
        assert_eq!(store.discussion(), DiscussionState::Missing);
        assert!(store.state().viewed.is_empty());
    }

    #[test]
    fn test_load_lifecycle() {
        let store = DiscussionStore::new();

        store.dispatch(StoreAction::LoadStarted);
        assert!(store.discussion().is_pending());

        store.dispatch(StoreAction::Loaded(discussion()));
        assert_eq!(store.discussion().discussion(), Some(&discussion()));

        store.dispatch(StoreAction::LoadFailed);
        assert_eq!(store.discussion(), DiscussionState::Failed);

        store.dispatch(StoreAction::NotAvailable);
        assert_eq!(store.discussion(), DiscussionState::NotAvailable);

        store.dispatch(StoreAction::Reset);
        assert_eq!(store.discussion(), DiscussionState::Missing);
    }

    #[test]
    fn test_viewed_does_not_touch_discussion() {
        let store = DiscussionStore::new();
        store.dispatch(StoreAction::Loaded(discussion()));
        store.dispatch(StoreAction::DiscussionViewed {
            office: "KPQR".to_string(),
            issuance_time: "t1".to_string(),
        });

        assert_eq!(store.viewed_issuance("KPQR").as_deref(), Some("t1"));
        assert!(store.discussion().discussion().is_some());
    }

    #[test]
    fn test_with_viewed_seeds_state() {
        let mut viewed = BTreeMap::new();
        viewed.insert("KSEW".to_string(), "t0".to_string());
        let store = DiscussionStore::with_viewed(viewed);
        assert_eq!(store.viewed_issuance("KSEW").as_deref(), Some("t0"));
        assert_eq!(store.viewed_issuance("KPQR"), None);
    }

    #[test]
    fn test_subscribers_are_notified() {
        let store = DiscussionStore::new();
        let mut rx = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);
        assert!(!rx.has_changed().unwrap());

        store.dispatch(StoreAction::LoadStarted);
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().discussion.is_pending());
        assert!(!rx.has_changed().unwrap());

        drop(rx);
        assert_eq!(store.subscriber_count(), 0);
        store.dispatch(StoreAction::LoadFailed);
        assert_eq!(store.discussion(), DiscussionState::Failed);
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_dispatch() {
        let store = DiscussionStore::new();
        let mut rx = store.subscribe();

        let waiter = tokio::spawn(async move {
            rx.changed().await.unwrap();
            rx.borrow().discussion.clone()
        });
        tokio::task::yield_now().await;
        store.dispatch(StoreAction::NotAvailable);

        assert_eq!(waiter.await.unwrap(), DiscussionState::NotAvailable);
    }
}
