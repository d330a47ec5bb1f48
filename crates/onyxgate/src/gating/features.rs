//! Gated product features mapped to minimum tiers.
//!
//! Free: basic hook/offer generation
//! Starter: + editing tools, copy export
//! Pro: + pro tools, funnel review
//! Vault: + swipe-copy vault
//! Admin: + admin panel

use serde::{Deserialize, Serialize};

use super::tier::Tier;

/// All tier-gated features in the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GatedFeature {
    // ── Free ───────────────────────────────────────────────────
    HookGeneration,
    OfferGeneration,

    // ── Starter ────────────────────────────────────────────────
    EditingTools,
    CopyExport,

    // ── Pro ────────────────────────────────────────────────────
    ProTools,
    FunnelReview,

    // ── Vault ──────────────────────────────────────────────────
    SwipeCopyVault,

    // ── Admin ──────────────────────────────────────────────────
    AdminPanel,
}

impl GatedFeature {
    /// All gated features.
    pub const ALL: [GatedFeature; 8] = [
        Self::HookGeneration,
        Self::OfferGeneration,
        Self::EditingTools,
        Self::CopyExport,
        Self::ProTools,
        Self::FunnelReview,
        Self::SwipeCopyVault,
        Self::AdminPanel,
    ];

    /// Minimum tier required for this feature.
    pub fn min_tier(&self) -> Tier {
        match self {
            Self::HookGeneration | Self::OfferGeneration => Tier::Free,
            Self::EditingTools | Self::CopyExport => Tier::Starter,
            Self::ProTools | Self::FunnelReview => Tier::Pro,
            Self::SwipeCopyVault => Tier::Vault,
            Self::AdminPanel => Tier::Admin,
        }
    }

    /// Feature name as string (for routes, logging, config).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HookGeneration => "hook_generation",
            Self::OfferGeneration => "offer_generation",
            Self::EditingTools => "editing_tools",
            Self::CopyExport => "copy_export",
            Self::ProTools => "pro_tools",
            Self::FunnelReview => "funnel_review",
            Self::SwipeCopyVault => "swipe_copy_vault",
            Self::AdminPanel => "admin_panel",
        }
    }

    /// Parse feature from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hook_generation" => Some(Self::HookGeneration),
            "offer_generation" => Some(Self::OfferGeneration),
            "editing_tools" => Some(Self::EditingTools),
            "copy_export" => Some(Self::CopyExport),
            "pro_tools" => Some(Self::ProTools),
            "funnel_review" => Some(Self::FunnelReview),
            "swipe_copy_vault" => Some(Self::SwipeCopyVault),
            "admin_panel" => Some(Self::AdminPanel),
            _ => None,
        }
    }

    /// Human-readable description for upgrade messages.
    pub fn description(&self) -> &'static str {
        match self {
            Self::HookGeneration => "AI hook generation",
            Self::OfferGeneration => "AI offer generation",
            Self::EditingTools => "Hook and offer editing",
            Self::CopyExport => "Copy export (no watermark)",
            Self::ProTools => "Pro toolkit (council, battle lab, analytics)",
            Self::FunnelReview => "Funnel review and critique",
            Self::SwipeCopyVault => "Monthly swipe-copy vault",
            Self::AdminPanel => "Admin dashboard",
        }
    }
}

/// Check if a tier grants access to a feature. Tiers are totally ordered, so
/// this is a rank comparison against the feature's minimum tier.
pub fn tier_allows(tier: Tier, feature: GatedFeature) -> bool {
    tier.rank() >= feature.min_tier().rank()
}

/// Get all features available at a given tier.
pub fn features_for_tier(tier: Tier) -> Vec<GatedFeature> {
    GatedFeature::ALL
        .iter()
        .copied()
        .filter(|f| tier_allows(tier, *f))
        .collect()
}
