//! Usage throttle — daily quotas, token budgets, and upgrade signals for
//! metered generation actions.
//!
//! Every operation is a pure function over an explicit snapshot: callers load
//! `UsageCounters`, call in here, and persist the returned value. The daily
//! reset is applied internally before any check or mutation, so a stale
//! snapshot from yesterday is always re-zeroed exactly once per call.
//!
//! Per user and calendar day the quota moves through three stages:
//! `UnderSoftCap -> NearSoftCap -> AtHardCap`, returning to `UnderSoftCap`
//! only via the daily reset. Unlimited plans never leave `UnderSoftCap`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::plans::PlanLimits;
use crate::usage::action::UsageAction;
use crate::usage::counters::UsageCounters;
use crate::usage::log::UsageLogEntry;

/// Zero the daily counters when the UTC calendar date has advanced past the
/// last reset. Idempotent within a day: the second call with the same `now`
/// is a no-op.
pub fn reset_daily_usage_if_needed(counters: UsageCounters, now: DateTime<Utc>) -> UsageCounters {
    if counters.last_usage_reset.date_naive() == now.date_naive() {
        return counters;
    }

    debug!(
        previous_reset = %counters.last_usage_reset,
        "daily usage counters reset"
    );
    UsageCounters {
        daily_offer_count: 0,
        daily_token_count: 0,
        last_usage_reset: now,
        ..counters
    }
}

/// Where a user's daily quota currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrottleStage {
    UnderSoftCap,
    NearSoftCap,
    AtHardCap,
}

/// Compute the quota stage. Assumes the daily reset has been applied.
pub fn throttle_stage(plan: &PlanLimits, counters: &UsageCounters) -> ThrottleStage {
    if plan.is_unlimited() {
        return ThrottleStage::UnderSoftCap;
    }
    if counters.daily_offer_count >= plan.daily_offer_generations {
        return ThrottleStage::AtHardCap;
    }
    if plan.daily_offer_generations > 0 {
        let ratio = counters.daily_offer_count as f64 / plan.daily_offer_generations as f64;
        if ratio >= plan.soft_cap_warning_ratio {
            return ThrottleStage::NearSoftCap;
        }
    }
    ThrottleStage::UnderSoftCap
}

/// User-facing usage status, serializable straight into a route response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatus {
    pub can_proceed: bool,
    /// Generations left today. `-1` mirrors the plan's unlimited sentinel.
    pub remaining_offers: i64,
    /// Tokens left today, clamped at 0.
    pub remaining_tokens: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_message: Option<String>,
    pub upgrade_required: bool,
    pub plan_limits: PlanLimits,
}

/// Compute the usage status for a plan/counters snapshot. Applies the daily
/// reset first. Always returns a fully populated status; never errors.
pub fn usage_status(plan: &PlanLimits, counters: &UsageCounters, now: DateTime<Utc>) -> UsageStatus {
    let counters = reset_daily_usage_if_needed(counters.clone(), now);
    let remaining_tokens = plan
        .daily_token_budget
        .saturating_sub(counters.daily_token_count)
        .max(0);

    if plan.is_unlimited() {
        return UsageStatus {
            can_proceed: true,
            remaining_offers: crate::plans::UNLIMITED,
            remaining_tokens,
            warning_message: None,
            upgrade_required: false,
            plan_limits: plan.clone(),
        };
    }

    let remaining_offers = plan
        .daily_offer_generations
        .saturating_sub(counters.daily_offer_count)
        .max(0);

    match throttle_stage(plan, &counters) {
        ThrottleStage::AtHardCap => UsageStatus {
            can_proceed: false,
            remaining_offers,
            remaining_tokens,
            warning_message: Some(format!(
                "You've reached your daily limit of {} generations. Upgrade to unlock more.",
                plan.daily_offer_generations
            )),
            upgrade_required: true,
            plan_limits: plan.clone(),
        },
        ThrottleStage::NearSoftCap => UsageStatus {
            can_proceed: true,
            remaining_offers,
            remaining_tokens,
            warning_message: Some(format!(
                "You have {} generation{} left today. Upgrade for unlimited access.",
                remaining_offers,
                if remaining_offers == 1 { "" } else { "s" }
            )),
            upgrade_required: false,
            plan_limits: plan.clone(),
        },
        ThrottleStage::UnderSoftCap => UsageStatus {
            can_proceed: true,
            remaining_offers,
            remaining_tokens,
            warning_message: None,
            upgrade_required: false,
            plan_limits: plan.clone(),
        },
    }
}

/// Outcome of a throttle check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrottleDecision {
    pub allowed: bool,
    pub status: UsageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Decide whether an action may proceed. Pure: never mutates counters —
/// mutation happens only in [`record_usage`].
///
/// Non-metered actions always pass (the caller has already verified the user
/// exists). Metered actions are denied at the hard cap, or when the token
/// estimate exceeds what's left of today's budget.
pub fn check_throttle(
    plan: &PlanLimits,
    counters: &UsageCounters,
    action: UsageAction,
    estimated_tokens: i64,
    now: DateTime<Utc>,
) -> ThrottleDecision {
    let status = usage_status(plan, counters, now);

    if !action.is_metered() {
        return ThrottleDecision {
            allowed: true,
            status,
            message: None,
        };
    }

    if !status.can_proceed {
        warn!(
            tier = plan.tier.as_str(),
            action = action.as_str(),
            "generation denied: daily limit reached"
        );
        let message = status.warning_message.clone();
        return ThrottleDecision {
            allowed: false,
            status,
            message,
        };
    }

    if status.remaining_tokens < estimated_tokens {
        warn!(
            tier = plan.tier.as_str(),
            remaining = status.remaining_tokens,
            estimated = estimated_tokens,
            "generation denied: insufficient token allowance"
        );
        return ThrottleDecision {
            allowed: false,
            status,
            message: Some(
                "Insufficient token allowance remaining today. Try again tomorrow or upgrade your plan."
                    .to_string(),
            ),
        };
    }

    ThrottleDecision {
        allowed: true,
        status,
        message: None,
    }
}

/// Record an action's outcome: returns the updated counters and the audit
/// entry. The caller persists both.
///
/// A log entry is always produced, success or not. Counters move only for
/// successful metered actions (daily + lifetime increments) and for the
/// first successful vault access (refund-eligibility timestamp).
pub fn record_usage(
    user_id: &str,
    counters: UsageCounters,
    action: UsageAction,
    tokens_used: i64,
    success: bool,
    metadata: serde_json::Value,
    now: DateTime<Utc>,
) -> (UsageCounters, UsageLogEntry) {
    let mut counters = reset_daily_usage_if_needed(counters, now);

    let entry = UsageLogEntry {
        user_id: user_id.to_string(),
        action,
        tokens_used,
        success,
        timestamp: now,
        metadata,
    };

    if success && action.is_metered() {
        counters.daily_offer_count += 1;
        counters.daily_token_count += tokens_used;
        counters.usage_count += 1;
        counters.updated_at = now;
    } else if success && action == UsageAction::VaultAccess {
        // First access only: the external refund policy keys on this.
        if counters.vault_accessed_at.is_none() {
            counters.vault_accessed_at = Some(now);
            counters.updated_at = now;
        }
    }

    (counters, entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gating::tier::Tier;
    use chrono::TimeZone;
    use serde_json::json;

    fn day(d: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, hour, 0, 0).unwrap()
    }

    fn starter_plan() -> PlanLimits {
        PlanLimits::for_tier(Tier::Starter)
    }

    fn free_plan() -> PlanLimits {
        PlanLimits::for_tier(Tier::Free)
    }

    fn counters_with(offers: i64, tokens: i64, reset: DateTime<Utc>) -> UsageCounters {
        UsageCounters {
            daily_offer_count: offers,
            daily_token_count: tokens,
            last_usage_reset: reset,
            usage_count: offers,
            vault_accessed_at: None,
            updated_at: reset,
        }
    }

    #[test]
    fn reset_is_noop_within_same_day() {
        let counters = counters_with(5, 1_000, day(10, 8));
        let once = reset_daily_usage_if_needed(counters.clone(), day(10, 23));
        assert_eq!(once, counters);
        let twice = reset_daily_usage_if_needed(once.clone(), day(10, 23));
        assert_eq!(twice, once);
    }

    #[test]
    fn reset_zeroes_counters_on_new_day() {
        let counters = counters_with(25, 50_000, day(10, 23));
        let reset = reset_daily_usage_if_needed(counters, day(11, 0));
        assert_eq!(reset.daily_offer_count, 0);
        assert_eq!(reset.daily_token_count, 0);
        assert_eq!(reset.last_usage_reset, day(11, 0));
        // Lifetime count survives the reset.
        assert_eq!(reset.usage_count, 25);
    }

    #[test]
    fn stage_progression() {
        let plan = starter_plan(); // 25/day, 0.8 warning ratio
        let now = day(10, 9);
        assert_eq!(
            throttle_stage(&plan, &counters_with(0, 0, now)),
            ThrottleStage::UnderSoftCap
        );
        assert_eq!(
            throttle_stage(&plan, &counters_with(19, 0, now)),
            ThrottleStage::UnderSoftCap
        );
        assert_eq!(
            throttle_stage(&plan, &counters_with(20, 0, now)),
            ThrottleStage::NearSoftCap
        );
        assert_eq!(
            throttle_stage(&plan, &counters_with(25, 0, now)),
            ThrottleStage::AtHardCap
        );
    }

    #[test]
    fn unlimited_plans_never_leave_under_soft_cap() {
        let plan = PlanLimits::for_tier(Tier::Pro);
        let now = day(10, 9);
        let counters = counters_with(10_000, 0, now);
        assert_eq!(throttle_stage(&plan, &counters), ThrottleStage::UnderSoftCap);
        let status = usage_status(&plan, &counters, now);
        assert!(status.can_proceed);
        assert_eq!(status.remaining_offers, crate::plans::UNLIMITED);
        assert!(status.warning_message.is_none());
    }

    #[test]
    fn starter_at_twenty_of_twenty_five_warns() {
        // 20/25 >= 0.8 triggers the soft-cap warning with 5 left.
        let plan = starter_plan();
        let now = day(10, 9);
        let status = usage_status(&plan, &counters_with(20, 10_000, now), now);
        assert!(status.can_proceed);
        assert_eq!(status.remaining_offers, 5);
        assert!(status.warning_message.unwrap().contains("5 generations"));
        assert!(!status.upgrade_required);
    }

    #[test]
    fn hard_cap_requires_upgrade() {
        let plan = free_plan(); // 2/day
        let now = day(10, 9);
        let status = usage_status(&plan, &counters_with(2, 500, now), now);
        assert!(!status.can_proceed);
        assert_eq!(status.remaining_offers, 0);
        assert!(status.upgrade_required);
        assert!(status.warning_message.unwrap().contains("daily limit"));
    }

    #[test]
    fn boundary_one_below_limit_allows_one_more() {
        let plan = starter_plan();
        let now = day(10, 9);
        let decision = check_throttle(
            &plan,
            &counters_with(24, 0, now),
            UsageAction::OfferGeneration,
            100,
            now,
        );
        assert!(decision.allowed);

        let decision = check_throttle(
            &plan,
            &counters_with(25, 0, now),
            UsageAction::OfferGeneration,
            100,
            now,
        );
        assert!(!decision.allowed);
        assert!(decision.status.upgrade_required);
        assert!(decision.message.is_some());
    }

    #[test]
    fn free_user_exhausted_after_two_generations() {
        let plan = free_plan();
        let now = day(10, 9);
        let mut counters = UsageCounters::fresh(now);
        for _ in 0..2 {
            let decision =
                check_throttle(&plan, &counters, UsageAction::OfferGeneration, 100, now);
            assert!(decision.allowed);
            let (updated, _) = record_usage(
                "user-1",
                counters,
                UsageAction::OfferGeneration,
                100,
                true,
                json!({}),
                now,
            );
            counters = updated;
        }
        let decision = check_throttle(&plan, &counters, UsageAction::OfferGeneration, 100, now);
        assert!(!decision.allowed);
        assert!(decision.status.upgrade_required);
    }

    #[test]
    fn non_metered_actions_bypass_the_quota() {
        let plan = free_plan();
        let now = day(10, 9);
        let exhausted = counters_with(2, 0, now);
        for action in [
            UsageAction::FunnelReview,
            UsageAction::VaultAccess,
            UsageAction::QuizAttempt,
        ] {
            let decision = check_throttle(&plan, &exhausted, action, 5_000, now);
            assert!(decision.allowed, "{:?} should bypass quota", action);
        }
    }

    #[test]
    fn token_estimate_over_budget_is_denied() {
        let plan = starter_plan(); // 60k token budget
        let now = day(10, 9);
        let counters = counters_with(1, 59_500, now);
        let decision = check_throttle(&plan, &counters, UsageAction::HookGeneration, 1_000, now);
        assert!(!decision.allowed);
        assert!(decision.message.unwrap().contains("token allowance"));
        // Quota itself was fine, only tokens ran short.
        assert!(!decision.status.upgrade_required);
    }

    #[test]
    fn successful_generations_increment_counters_monotonically() {
        let now = day(10, 9);
        let mut counters = UsageCounters::fresh(now);
        for i in 1..=5 {
            let (updated, entry) = record_usage(
                "user-1",
                counters,
                UsageAction::HookGeneration,
                200,
                true,
                json!({}),
                now,
            );
            counters = updated;
            assert_eq!(counters.daily_offer_count, i);
            assert_eq!(counters.daily_token_count, 200 * i);
            assert_eq!(counters.usage_count, i);
            assert!(entry.success);
        }
    }

    #[test]
    fn failed_actions_log_but_never_mutate() {
        let now = day(10, 9);
        let counters = counters_with(3, 600, now);
        let (updated, entry) = record_usage(
            "user-1",
            counters.clone(),
            UsageAction::OfferGeneration,
            350,
            false,
            json!({ "error": "upstream timeout" }),
            now,
        );
        assert_eq!(updated, counters);
        assert!(!entry.success);
        assert_eq!(entry.tokens_used, 350);
    }

    #[test]
    fn non_metered_success_does_not_touch_quota() {
        let now = day(10, 9);
        let counters = counters_with(3, 600, now);
        let (updated, _) = record_usage(
            "user-1",
            counters.clone(),
            UsageAction::QuizAttempt,
            0,
            true,
            json!({}),
            now,
        );
        assert_eq!(updated.daily_offer_count, counters.daily_offer_count);
        assert_eq!(updated.usage_count, counters.usage_count);
    }

    #[test]
    fn vault_access_stamps_first_access_only() {
        let first = day(10, 9);
        let later = day(10, 15);
        let counters = UsageCounters::fresh(first);

        let (counters, _) = record_usage(
            "user-1",
            counters,
            UsageAction::VaultAccess,
            0,
            true,
            json!({}),
            first,
        );
        assert_eq!(counters.vault_accessed_at, Some(first));

        let (counters, _) = record_usage(
            "user-1",
            counters,
            UsageAction::VaultAccess,
            0,
            true,
            json!({}),
            later,
        );
        assert_eq!(counters.vault_accessed_at, Some(first));
    }

    #[test]
    fn failed_vault_access_does_not_stamp() {
        let now = day(10, 9);
        let (counters, _) = record_usage(
            "user-1",
            UsageCounters::fresh(now),
            UsageAction::VaultAccess,
            0,
            false,
            json!({}),
            now,
        );
        assert!(counters.vault_accessed_at.is_none());
    }

    #[test]
    fn exhausted_user_can_proceed_after_date_rolls_over() {
        let plan = free_plan();
        let yesterday = day(10, 22);
        let today = day(11, 7);
        let exhausted = counters_with(2, 9_000, yesterday);

        let status = usage_status(&plan, &exhausted, today);
        assert!(status.can_proceed);
        assert_eq!(status.remaining_offers, 2);

        let decision = check_throttle(&plan, &exhausted, UsageAction::OfferGeneration, 100, today);
        assert!(decision.allowed);
    }

    #[test]
    fn status_serializes_camel_case() {
        let plan = free_plan();
        let now = day(10, 9);
        let status = usage_status(&plan, &UsageCounters::fresh(now), now);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["canProceed"], true);
        assert_eq!(json["remainingOffers"], 2);
        assert!(json.get("planLimits").is_some());
        // No warning yet, so the field is omitted entirely.
        assert!(json.get("warningMessage").is_none());
    }
}
