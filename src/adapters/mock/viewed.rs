//! In-memory viewed storage for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::traits::ViewedStorage;

/// In-memory viewed storage.
///
/// Records every write so tests can assert how often the view marked a
/// discussion as viewed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryViewedStorage {
    /// Office -> last viewed issuance
    viewed: Arc<Mutex<HashMap<String, String>>>,
    /// Every (office, issuance) written, in order
    writes: Arc<Mutex<Vec<(String, String)>>>,
}

impl InMemoryViewedStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes so far.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ViewedStorage for InMemoryViewedStorage {
    fn set_discussion_viewed(&self, office: &str, issuance_time: &str) -> Result<(), StorageError> {
        self.viewed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(office.to_string(), issuance_time.to_string());
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((office.to_string(), issuance_time.to_string()));
        Ok(())
    }

    fn discussion_viewed(&self, office: &str) -> Option<String> {
        self.viewed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(office)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_round_trip() {
        let storage = InMemoryViewedStorage::new();
        assert!(storage.is_unviewed("KPQR", "t1"));

        storage.set_discussion_viewed("KPQR", "t1").unwrap();
        assert!(!storage.is_unviewed("KPQR", "t1"));
        assert_eq!(storage.writes(), vec![("KPQR".to_string(), "t1".to_string())]);
    }
}
