//! Usage audit log — append-only entries plus an in-memory ledger.
//!
//! Entries are never updated or deleted here; retention and export are
//! external concerns.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::UsageAction;

/// One immutable audit record, emitted for every recorded action whether or
/// not it succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLogEntry {
    pub user_id: String,
    pub action: UsageAction,
    pub tokens_used: i64,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub metadata: serde_json::Value,
}

/// Buffer cap to prevent unbounded memory growth
const LEDGER_CAP: usize = 1000;

/// In-memory audit ledger — buffers entries until the caller drains them to
/// storage. For callers that batch their audit writes instead of persisting
/// entry-by-entry.
#[derive(Debug, Default)]
pub struct UsageLedger {
    buffer: Mutex<Vec<UsageLogEntry>>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Buffer an entry. Entries beyond the cap are dropped.
    pub fn record(&self, entry: UsageLogEntry) {
        if let Ok(mut buf) = self.buffer.lock() {
            if buf.len() < LEDGER_CAP {
                buf.push(entry);
            }
        }
    }

    /// Take all buffered entries (for flushing to storage).
    pub fn drain(&self) -> Vec<UsageLogEntry> {
        if let Ok(mut buf) = self.buffer.lock() {
            std::mem::take(&mut *buf)
        } else {
            Vec::new()
        }
    }

    /// Number of buffered entries.
    pub fn pending_count(&self) -> usize {
        self.buffer.lock().map(|b| b.len()).unwrap_or(0)
    }

    /// Serialize and drain buffered entries as a JSON batch. `None` when the
    /// buffer is empty.
    pub fn serialize_batch(&self) -> Option<String> {
        let entries = self.drain();
        if entries.is_empty() {
            return None;
        }
        serde_json::to_string(&entries).ok()
    }
}
