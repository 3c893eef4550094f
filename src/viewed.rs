//! "Discussion viewed" bookkeeping.
//!
//! After a loaded discussion has been drawn, the tracker tells the store and
//! persistent storage about it. The notification fires once per distinct
//! discussion (issuing office + issuance time); redraws of the same
//! discussion are no-ops.

use std::sync::Arc;

use crate::discussion::Discussion;
use crate::store::{DiscussionStore, StoreAction};
use crate::traits::ViewedStorage;

/// Fires the viewed notification once per discussion.
pub struct ViewedTracker {
    storage: Arc<dyn ViewedStorage>,
    /// (office, issuance time) of the last discussion reported
    last_reported: Option<(String, String)>,
}

impl ViewedTracker {
    /// Create a tracker writing to `storage`.
    pub fn new(storage: Arc<dyn ViewedStorage>) -> Self {
        Self {
            storage,
            last_reported: None,
        }
    }

    /// Record that `discussion` was rendered.
    ///
    /// Returns `true` if this call fired the notification.
    pub fn discussion_rendered(&mut self, store: &DiscussionStore, discussion: &Discussion) -> bool {
        let (office, issuance_time) = discussion.key();
        if let Some((last_office, last_time)) = &self.last_reported {
            if last_office == office && last_time == issuance_time {
                return false;
            }
        }

        tracing::info!(office, issuance_time, "discussion viewed");
        store.dispatch(StoreAction::DiscussionViewed {
            office: office.to_string(),
            issuance_time: issuance_time.to_string(),
        });
        if let Err(err) = self.storage.set_discussion_viewed(office, issuance_time) {
            tracing::warn!(error = %err, code = err.error_code(), "failed to persist viewed state");
        }

        self.last_reported = Some((office.to_string(), issuance_time.to_string()));
        true
    }

    /// Forget the last reported discussion so the next render fires again.
    pub fn reset(&mut self) {
        self.last_reported = None;
    }
}

impl std::fmt::Debug for ViewedTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewedTracker")
            .field("last_reported", &self.last_reported)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryViewedStorage;

    fn discussion(time: &str) -> Discussion {
        Discussion::new("text", "KPQR", time)
    }

    #[test]
    fn test_fires_once_per_issuance() {
        let storage = InMemoryViewedStorage::new();
        let store = DiscussionStore::new();
        let mut tracker = ViewedTracker::new(Arc::new(storage.clone()));

        let first = discussion("t1");
        assert!(tracker.discussion_rendered(&store, &first));
        for _ in 0..10 {
            assert!(!tracker.discussion_rendered(&store, &first));
        }

        assert_eq!(storage.writes().len(), 1);
        assert_eq!(store.viewed_issuance("KPQR").as_deref(), Some("t1"));
    }

    #[test]
    fn test_new_issuance_fires_again() {
        let storage = InMemoryViewedStorage::new();
        let store = DiscussionStore::new();
        let mut tracker = ViewedTracker::new(Arc::new(storage.clone()));

        assert!(tracker.discussion_rendered(&store, &discussion("t1")));
        assert!(tracker.discussion_rendered(&store, &discussion("t2")));
        assert!(!tracker.discussion_rendered(&store, &discussion("t2")));

        assert_eq!(
            storage.writes(),
            vec![
                ("KPQR".to_string(), "t1".to_string()),
                ("KPQR".to_string(), "t2".to_string()),
            ]
        );
        assert_eq!(store.viewed_issuance("KPQR").as_deref(), Some("t2"));
    }

    #[test]
    fn test_other_office_same_time_fires() {
        let storage = InMemoryViewedStorage::new();
        let store = DiscussionStore::new();
        let mut tracker = ViewedTracker::new(Arc::new(storage.clone()));

        assert!(tracker.discussion_rendered(&store, &Discussion::new("", "KPQR", "t1")));
        assert!(tracker.discussion_rendered(&store, &Discussion::new("", "KSEW", "t1")));
        assert_eq!(storage.writes().len(), 2);
    }

    #[test]
    fn test_reset_allows_refire() {
        let storage = InMemoryViewedStorage::new();
        let store = DiscussionStore::new();
        let mut tracker = ViewedTracker::new(Arc::new(storage.clone()));

        assert!(tracker.discussion_rendered(&store, &discussion("t1")));
        tracker.reset();
        assert!(tracker.discussion_rendered(&store, &discussion("t1")));
        assert_eq!(storage.writes().len(), 2);
    }
}
