//! `UsageStore` — the persistence seam for counters and audit entries.

use crate::errors::StoreError;
use crate::usage::counters::UsageCounters;
use crate::usage::log::UsageLogEntry;

/// Storage contract for per-user usage state.
///
/// The throttle itself is pure; implementations of this trait own the
/// concurrency story. Two concurrent requests for the same user can both
/// load counters, both pass `check_throttle`, and both call `record_usage` —
/// a classic read-modify-write race that would under-throttle. An
/// implementation must therefore make the check-then-record sequence atomic:
/// either a conditional update ("increment only while below the limit")
/// executed as one storage operation, or a per-user lock/transaction held
/// across the sequence.
pub trait UsageStore {
    /// Load a user's counters. `Ok(None)` when the user has no usage record
    /// yet; callers start from [`UsageCounters::fresh`] in that case.
    fn load_counters(&self, user_id: &str) -> Result<Option<UsageCounters>, StoreError>;

    /// Persist a user's counters, replacing the stored snapshot.
    fn persist_counters(&self, user_id: &str, counters: &UsageCounters) -> Result<(), StoreError>;

    /// Append an audit entry. Entries are immutable once written.
    fn append_log(&self, entry: &UsageLogEntry) -> Result<(), StoreError>;
}
