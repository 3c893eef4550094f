//! Persistent "discussion viewed" storage trait.

use crate::error::StorageError;

/// Persistent record of the last viewed discussion per issuing office.
///
/// Implementations include the production JSON file under `~/.afdview` and
/// an in-memory store for tests.
pub trait ViewedStorage: Send + Sync {
    /// Record that the discussion issued at `issuance_time` by `office` was viewed.
    fn set_discussion_viewed(&self, office: &str, issuance_time: &str) -> Result<(), StorageError>;

    /// Issuance time of the last viewed discussion for `office`.
    fn discussion_viewed(&self, office: &str) -> Option<String>;

    /// Whether the given issuance has not been viewed yet.
    fn is_unviewed(&self, office: &str, issuance_time: &str) -> bool {
        self.discussion_viewed(office).as_deref() != Some(issuance_time)
    }
}
