//! Per-user usage counters.
//!
//! Borrowed state: callers load the snapshot, pass it through the throttle,
//! and persist whatever comes back. Only `record_usage` mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily and lifetime usage for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounters {
    /// Offer/hook generations so far today. Resets once per UTC calendar day.
    pub daily_offer_count: i64,
    /// Tokens consumed so far today. Resets with `daily_offer_count`.
    pub daily_token_count: i64,
    /// When the daily counters were last zeroed.
    pub last_usage_reset: DateTime<Utc>,
    /// Lifetime successful generation count.
    pub usage_count: i64,
    /// First successful vault access, if any. Drives refund eligibility
    /// externally; never cleared once set.
    #[serde(default)]
    pub vault_accessed_at: Option<DateTime<Utc>>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UsageCounters {
    /// All-zero counters for a brand-new user, reset stamped `now`.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            daily_offer_count: 0,
            daily_token_count: 0,
            last_usage_reset: now,
            usage_count: 0,
            vault_accessed_at: None,
            updated_at: now,
        }
    }
}
