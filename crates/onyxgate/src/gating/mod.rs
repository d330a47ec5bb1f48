//! Tier gating — subscription tiers, access evaluation, feature mapping.
//!
//! ## Tiers
//! - **Free**: basic hook/offer generation (watermarked, 2/day)
//! - **Starter**: + editing, copy export, 25 generations/day
//! - **Pro**: + pro tools, funnel review, unlimited generations
//! - **Vault**: + swipe-copy vault
//! - **Admin**: superset — satisfies every tier requirement
//!
//! ## Components
//! - **tier** — ordered `Tier` and `SubscriptionStatus` enums, one canonical rank function
//! - **subscription** — per-user billing state snapshot and expiry sweep
//! - **features** — gated product features mapped to minimum tiers
//! - **access** — the access evaluator: tier sufficiency × subscription validity

pub mod access;
pub mod features;
pub mod subscription;
pub mod tier;

pub use access::{
    can_access_premium, evaluate_access, has_feature_access, has_sufficient_tier, DenialReason,
    FeatureAccess,
};
pub use features::{features_for_tier, tier_allows, GatedFeature};
pub use subscription::{sweep_expired, SubscriptionState};
pub use tier::{SubscriptionStatus, Tier};
