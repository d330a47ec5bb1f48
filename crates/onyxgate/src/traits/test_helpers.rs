//! `InMemoryUsageStore` — in-memory test double for `UsageStore`.
//!
//! Used by integration tests to exercise the load → decide → persist flow
//! without a real database.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::StoreError;
use crate::usage::counters::UsageCounters;
use crate::usage::log::UsageLogEntry;

use super::usage_store::UsageStore;

/// In-memory implementation of `UsageStore`.
///
/// The whole store is behind one mutex, so check-then-record sequences are
/// atomic as long as the caller holds no counters across await points — good
/// enough for tests, not a production store.
pub struct InMemoryUsageStore {
    counters: Mutex<HashMap<String, UsageCounters>>,
    log: Mutex<Vec<UsageLogEntry>>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Number of appended audit entries.
    pub fn log_len(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    /// Snapshot of all audit entries.
    pub fn log_entries(&self) -> Vec<UsageLogEntry> {
        self.log.lock().unwrap().clone()
    }
}

impl Default for InMemoryUsageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageStore for InMemoryUsageStore {
    fn load_counters(&self, user_id: &str) -> Result<Option<UsageCounters>, StoreError> {
        Ok(self.counters.lock().unwrap().get(user_id).cloned())
    }

    fn persist_counters(&self, user_id: &str, counters: &UsageCounters) -> Result<(), StoreError> {
        self.counters
            .lock()
            .unwrap()
            .insert(user_id.to_string(), counters.clone());
        Ok(())
    }

    fn append_log(&self, entry: &UsageLogEntry) -> Result<(), StoreError> {
        self.log.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
