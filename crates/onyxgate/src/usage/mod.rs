//! Usage tracking types — metered actions, per-user counters, audit log.

pub mod action;
pub mod counters;
pub mod log;

pub use action::UsageAction;
pub use counters::UsageCounters;
pub use log::{UsageLedger, UsageLogEntry};
