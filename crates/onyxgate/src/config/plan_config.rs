//! Plan-limit overrides loaded from a TOML file.
//!
//! Every field is optional; anything absent keeps the built-in default for
//! that tier. Capability flags are not overridable — they define what a tier
//! *is*, while this file only tunes the numeric throttle knobs.
//!
//! ```toml
//! [starter]
//! daily_offer_generations = 25
//! daily_token_budget = 60000
//!
//! [free]
//! soft_cap_warning_ratio = 0.9
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ConfigError;
use crate::gating::tier::Tier;
use crate::plans::{PlanTable, UNLIMITED};

/// Numeric overrides for one tier.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlanOverride {
    pub daily_offer_generations: Option<i64>,
    pub daily_token_budget: Option<i64>,
    pub soft_cap_warning_ratio: Option<f64>,
}

impl PlanOverride {
    fn is_empty(&self) -> bool {
        self.daily_offer_generations.is_none()
            && self.daily_token_budget.is_none()
            && self.soft_cap_warning_ratio.is_none()
    }
}

/// The whole override file: one optional table per tier.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlansFile {
    pub free: PlanOverride,
    pub starter: PlanOverride,
    pub pro: PlanOverride,
    pub vault: PlanOverride,
    pub admin: PlanOverride,
}

impl PlansFile {
    fn for_tier(&self, tier: Tier) -> &PlanOverride {
        match tier {
            Tier::Free => &self.free,
            Tier::Starter => &self.starter,
            Tier::Pro => &self.pro,
            Tier::Vault => &self.vault,
            Tier::Admin => &self.admin,
        }
    }

    /// Validate and apply the overrides on top of the built-in table.
    pub fn apply(&self, mut table: PlanTable) -> Result<PlanTable, ConfigError> {
        for tier in Tier::ALL {
            let over = self.for_tier(tier);
            if over.is_empty() {
                continue;
            }

            if let Some(limit) = over.daily_offer_generations {
                if limit < UNLIMITED {
                    return Err(ConfigError::InvalidLimit {
                        tier: tier.as_str().to_string(),
                        value: limit,
                    });
                }
                table.get_mut(tier).daily_offer_generations = limit;
            }
            if let Some(budget) = over.daily_token_budget {
                if budget < 0 {
                    return Err(ConfigError::InvalidLimit {
                        tier: tier.as_str().to_string(),
                        value: budget,
                    });
                }
                table.get_mut(tier).daily_token_budget = budget;
            }
            if let Some(ratio) = over.soft_cap_warning_ratio {
                if !(ratio > 0.0 && ratio <= 1.0) {
                    return Err(ConfigError::InvalidRatio {
                        tier: tier.as_str().to_string(),
                        value: ratio,
                    });
                }
                table.get_mut(tier).soft_cap_warning_ratio = ratio;
            }
            info!(tier = tier.as_str(), "plan limits overridden from config");
        }
        Ok(table)
    }
}

/// Load the plan table: built-in defaults with TOML overrides applied.
pub fn load_plan_table(path: &Path) -> Result<PlanTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        message: e.to_string(),
    })?;
    let file: PlansFile = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        message: e.to_string(),
    })?;
    file.apply(PlanTable::builtin())
}
