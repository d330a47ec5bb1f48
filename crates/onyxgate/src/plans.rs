//! Per-tier plan limits — one immutable record per tier, built at startup.
//!
//! The capability set of every tier is statically enumerable here; nothing
//! probes optional fields at runtime.

use serde::{Deserialize, Serialize};

use crate::gating::tier::Tier;

/// Sentinel for plans with no daily generation cap.
pub const UNLIMITED: i64 = -1;

/// Limits and capability flags for one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub tier: Tier,
    /// Daily offer/hook generation cap. `-1` = unlimited.
    pub daily_offer_generations: i64,
    /// Daily token budget for generation calls.
    pub daily_token_budget: i64,
    /// Usage ratio at which a soft-cap warning is surfaced (e.g. 0.8).
    pub soft_cap_warning_ratio: f64,
    pub has_watermark: bool,
    pub can_edit: bool,
    pub can_export: bool,
    pub has_pro_tools: bool,
    pub has_vault_tools: bool,
}

impl PlanLimits {
    /// Built-in limits for a tier.
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Free => Self {
                tier,
                daily_offer_generations: 2,
                daily_token_budget: 10_000,
                soft_cap_warning_ratio: 0.8,
                has_watermark: true,
                can_edit: false,
                can_export: false,
                has_pro_tools: false,
                has_vault_tools: false,
            },
            Tier::Starter => Self {
                tier,
                daily_offer_generations: 25,
                daily_token_budget: 60_000,
                soft_cap_warning_ratio: 0.8,
                has_watermark: false,
                can_edit: true,
                can_export: true,
                has_pro_tools: false,
                has_vault_tools: false,
            },
            Tier::Pro => Self {
                tier,
                daily_offer_generations: UNLIMITED,
                daily_token_budget: 250_000,
                soft_cap_warning_ratio: 0.8,
                has_watermark: false,
                can_edit: true,
                can_export: true,
                has_pro_tools: true,
                has_vault_tools: false,
            },
            Tier::Vault => Self {
                tier,
                daily_offer_generations: UNLIMITED,
                daily_token_budget: 500_000,
                soft_cap_warning_ratio: 0.8,
                has_watermark: false,
                can_edit: true,
                can_export: true,
                has_pro_tools: true,
                has_vault_tools: true,
            },
            Tier::Admin => Self {
                tier,
                daily_offer_generations: UNLIMITED,
                daily_token_budget: i64::MAX,
                soft_cap_warning_ratio: 0.8,
                has_watermark: false,
                can_edit: true,
                can_export: true,
                has_pro_tools: true,
                has_vault_tools: true,
            },
        }
    }

    /// Whether this plan has no daily generation cap.
    pub fn is_unlimited(&self) -> bool {
        self.daily_offer_generations == UNLIMITED
    }
}

/// The canonical plan table: one record per tier, constructed once at
/// process start and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTable {
    free: PlanLimits,
    starter: PlanLimits,
    pro: PlanLimits,
    vault: PlanLimits,
    admin: PlanLimits,
}

impl PlanTable {
    /// Table with the built-in limits for every tier.
    pub fn builtin() -> Self {
        Self {
            free: PlanLimits::for_tier(Tier::Free),
            starter: PlanLimits::for_tier(Tier::Starter),
            pro: PlanLimits::for_tier(Tier::Pro),
            vault: PlanLimits::for_tier(Tier::Vault),
            admin: PlanLimits::for_tier(Tier::Admin),
        }
    }

    pub fn get(&self, tier: Tier) -> &PlanLimits {
        match tier {
            Tier::Free => &self.free,
            Tier::Starter => &self.starter,
            Tier::Pro => &self.pro,
            Tier::Vault => &self.vault,
            Tier::Admin => &self.admin,
        }
    }

    pub(crate) fn get_mut(&mut self, tier: Tier) -> &mut PlanLimits {
        match tier {
            Tier::Free => &mut self.free,
            Tier::Starter => &mut self.starter,
            Tier::Pro => &mut self.pro,
            Tier::Vault => &mut self.vault,
            Tier::Admin => &mut self.admin,
        }
    }
}

impl Default for PlanTable {
    fn default() -> Self {
        Self::builtin()
    }
}
