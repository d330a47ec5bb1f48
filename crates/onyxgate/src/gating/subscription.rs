//! Per-user subscription state snapshot.
//!
//! Created at signup (free tier), mutated by billing-webhook handlers on
//! payment events, and downgraded by the periodic expiry sweep. This module
//! only defines the snapshot and the pure sweep transition — loading and
//! persisting it is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::tier::{SubscriptionStatus, Tier};

/// A user's billing state as the access evaluator sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionState {
    pub tier: Tier,
    pub subscription_status: SubscriptionStatus,
    pub access_granted: bool,
    /// End of the current paid period. `None` for free-tier users and
    /// never-expiring grants.
    #[serde(default)]
    pub subscription_ends_at: Option<DateTime<Utc>>,
}

impl SubscriptionState {
    /// State for a brand-new signup: free tier, nothing granted.
    pub fn new_signup() -> Self {
        Self {
            tier: Tier::Free,
            subscription_status: SubscriptionStatus::Active,
            access_granted: false,
            subscription_ends_at: None,
        }
    }

    /// Whether the paid period has lapsed as of `now`.
    pub fn is_lapsed(&self, now: DateTime<Utc>) -> bool {
        matches!(self.subscription_ends_at, Some(ends_at) if ends_at < now)
    }
}

/// Expiry sweep transition: if a paid user's period has lapsed, downgrade to
/// the free tier with status `expired` and revoke access. Otherwise the state
/// comes back unchanged. The caller persists the result.
pub fn sweep_expired(state: SubscriptionState, now: DateTime<Utc>) -> SubscriptionState {
    if state.tier == Tier::Free || !state.is_lapsed(now) {
        return state;
    }

    info!(
        from_tier = state.tier.as_str(),
        "subscription lapsed, downgrading to free"
    );
    SubscriptionState {
        tier: Tier::Free,
        subscription_status: SubscriptionStatus::Expired,
        access_granted: false,
        subscription_ends_at: state.subscription_ends_at,
    }
}
