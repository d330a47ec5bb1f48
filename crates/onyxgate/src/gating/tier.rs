//! Subscription tiers and billing status — the single source of truth for
//! tier ordering. Comparison is by rank, never by name.

use serde::{Deserialize, Serialize};

/// Subscription tier, ordered `Free < Starter < Pro < Vault < Admin`.
///
/// `Admin` is a superset tier: it outranks everything and satisfies any
/// requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Starter,
    Pro,
    Vault,
    Admin,
}

impl Tier {
    /// All tiers, lowest rank first.
    pub const ALL: [Tier; 5] = [
        Self::Free,
        Self::Starter,
        Self::Pro,
        Self::Vault,
        Self::Admin,
    ];

    /// Numeric rank used for every tier comparison in the system.
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Starter => 1,
            Self::Pro => 2,
            Self::Vault => 3,
            Self::Admin => 4,
        }
    }

    /// Tier name as stored in user records and config.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Vault => "vault",
            Self::Admin => "admin",
        }
    }

    /// Parse a tier from its stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Self::Free),
            "starter" => Some(Self::Starter),
            "pro" => Some(Self::Pro),
            "vault" => Some(Self::Vault),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Rank of a raw tier string. Unrecognized strings coerce to rank 0 (free).
///
/// This coercion applies to both the user's tier and the required tier, which
/// makes an unrecognized *requirement* trivially satisfiable by any known
/// tier. That asymmetry matches the shipped behavior and is kept intact; a
/// warning is logged so bad tier strings show up in operator logs.
pub fn rank_of(s: &str) -> u8 {
    match Tier::parse(s) {
        Some(tier) => tier.rank(),
        None => {
            tracing::warn!(tier = s, "unrecognized tier string, coercing to rank 0");
            0
        }
    }
}

/// Billing status of a subscription, as reported by webhook handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Canceled,
    Expired,
}

impl SubscriptionStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
            Self::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "past_due" => Some(Self::PastDue),
            "canceled" => Some(Self::Canceled),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_strictly_increasing() {
        let ranks: Vec<u8> = Tier::ALL.iter().map(|t| t.rank()).collect();
        for pair in ranks.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn tier_string_roundtrip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::parse(tier.as_str()), Some(tier));
        }
    }

    #[test]
    fn unknown_tier_coerces_to_rank_zero() {
        assert_eq!(rank_of("platinum"), 0);
        assert_eq!(rank_of(""), 0);
        assert_eq!(rank_of("vault"), Tier::Vault.rank());
    }

    #[test]
    fn status_string_roundtrip() {
        for status in [
            SubscriptionStatus::Active,
            SubscriptionStatus::PastDue,
            SubscriptionStatus::Canceled,
            SubscriptionStatus::Expired,
        ] {
            assert_eq!(SubscriptionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SubscriptionStatus::parse("trialing"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Tier::Starter).unwrap();
        assert_eq!(json, "\"starter\"");
        let status: SubscriptionStatus = serde_json::from_str("\"past_due\"").unwrap();
        assert_eq!(status, SubscriptionStatus::PastDue);
    }
}
