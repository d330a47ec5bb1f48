//! # onyxgate
//!
//! Entitlement and usage-throttling core for the OnyxHooks platform.
//! Defines the tier model, plan limits, subscription access checks, daily
//! quota enforcement, and the audit-log types. Pure decision logic over
//! caller-supplied state snapshots — route handlers load state, call in here,
//! and persist whatever comes back.

pub mod config;
pub mod errors;
pub mod gating;
pub mod plans;
pub mod throttle;
pub mod tracing;
pub mod traits;
pub mod usage;

// Re-export the most commonly used types at the crate root.
pub use errors::error_code::GateErrorCode;
pub use gating::access::{evaluate_access, has_feature_access, FeatureAccess};
pub use gating::tier::{SubscriptionStatus, Tier};
pub use plans::{PlanLimits, PlanTable};
pub use throttle::{
    check_throttle, record_usage, reset_daily_usage_if_needed, usage_status, ThrottleDecision,
    ThrottleStage, UsageStatus,
};
pub use usage::action::UsageAction;
pub use usage::counters::UsageCounters;
pub use usage::log::{UsageLedger, UsageLogEntry};
