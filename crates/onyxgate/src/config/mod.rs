//! Configuration — TOML overrides for the built-in plan limits.

pub mod plan_config;

pub use plan_config::{load_plan_table, PlanOverride, PlansFile};
