//! Access evaluator — "can this user use this tier-gated feature right now?"
//!
//! Every function here is total: no I/O, no errors, every input (including
//! malformed tier strings) maps to a defined boolean or verdict.

use super::tier::{rank_of, SubscriptionStatus, Tier};
use super::subscription::SubscriptionState;

const UPGRADE_URL: &str = "https://onyxhooks.com/subscribe";

/// Rank comparison between two tiers.
pub fn has_sufficient_tier(user_tier: Tier, required_tier: Tier) -> bool {
    user_tier.rank() >= required_tier.rank()
}

/// Rank comparison over raw tier strings, as stored in user records.
///
/// Unrecognized strings coerce to rank 0 on *both* sides, so an unrecognized
/// requirement is trivially satisfied by any tier. Shipped behavior, kept
/// intact.
pub fn has_sufficient_tier_raw(user_tier: &str, required_tier: &str) -> bool {
    rank_of(user_tier) >= rank_of(required_tier)
}

/// Whether the subscription itself permits premium use.
///
/// Free-tier users always pass — free features carry no billing gate, so the
/// subscription fields are irrelevant for them. Any paid tier requires an
/// active subscription with access granted.
pub fn can_access_premium(state: &SubscriptionState) -> bool {
    if state.tier == Tier::Free {
        return true;
    }
    state.subscription_status == SubscriptionStatus::Active && state.access_granted
}

/// The full gate: tier sufficiency AND subscription validity.
///
/// A vault user with a lapsed subscription is denied even though their rank
/// is high enough; a free user always passes for free-tier requirements.
pub fn has_feature_access(state: &SubscriptionState, required_tier: Tier) -> bool {
    has_sufficient_tier(state.tier, required_tier) && can_access_premium(state)
}

/// Result of an access evaluation, with enough context to render an
/// actionable denial message without further lookups.
#[derive(Debug, Clone)]
pub enum FeatureAccess {
    Allowed,
    Denied {
        required_tier: Tier,
        current_tier: Tier,
        reason: DenialReason,
        upgrade_url: String,
    },
}

/// Why access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    TierInsufficient,
    SubscriptionInactive,
}

impl FeatureAccess {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn denial_message(&self) -> Option<String> {
        match self {
            Self::Denied {
                required_tier,
                reason: DenialReason::TierInsufficient,
                upgrade_url,
                ..
            } => Some(format!(
                "This feature requires the {} tier. Upgrade at {}",
                required_tier.as_str(),
                upgrade_url
            )),
            Self::Denied {
                reason: DenialReason::SubscriptionInactive,
                upgrade_url,
                ..
            } => Some(format!(
                "Your subscription is no longer active. Renew at {} to regain access.",
                upgrade_url
            )),
            Self::Allowed => None,
        }
    }
}

/// Evaluate access and return a rich verdict instead of a bare boolean.
pub fn evaluate_access(state: &SubscriptionState, required_tier: Tier) -> FeatureAccess {
    if !has_sufficient_tier(state.tier, required_tier) {
        return FeatureAccess::Denied {
            required_tier,
            current_tier: state.tier,
            reason: DenialReason::TierInsufficient,
            upgrade_url: UPGRADE_URL.to_string(),
        };
    }
    if !can_access_premium(state) {
        return FeatureAccess::Denied {
            required_tier,
            current_tier: state.tier,
            reason: DenialReason::SubscriptionInactive,
            upgrade_url: UPGRADE_URL.to_string(),
        };
    }
    FeatureAccess::Allowed
}
