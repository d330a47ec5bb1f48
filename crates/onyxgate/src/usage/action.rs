//! Actions that pass through the usage throttle.

use serde::{Deserialize, Serialize};

/// An action a route handler reports to the throttle.
///
/// Only the two generation actions are quota-metered; the rest pass through
/// `check_throttle` unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageAction {
    HookGeneration,
    OfferGeneration,
    FunnelReview,
    VaultAccess,
    QuizAttempt,
}

impl UsageAction {
    pub const ALL: [UsageAction; 5] = [
        Self::HookGeneration,
        Self::OfferGeneration,
        Self::FunnelReview,
        Self::VaultAccess,
        Self::QuizAttempt,
    ];

    /// Whether this action consumes the daily generation quota.
    pub const fn is_metered(&self) -> bool {
        matches!(self, Self::HookGeneration | Self::OfferGeneration)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HookGeneration => "hook_generation",
            Self::OfferGeneration => "offer_generation",
            Self::FunnelReview => "funnel_review",
            Self::VaultAccess => "vault_access",
            Self::QuizAttempt => "quiz_attempt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hook_generation" => Some(Self::HookGeneration),
            "offer_generation" => Some(Self::OfferGeneration),
            "funnel_review" => Some(Self::FunnelReview),
            "vault_access" => Some(Self::VaultAccess),
            "quiz_attempt" => Some(Self::QuizAttempt),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_generation_actions_are_metered() {
        assert!(UsageAction::HookGeneration.is_metered());
        assert!(UsageAction::OfferGeneration.is_metered());
        assert!(!UsageAction::FunnelReview.is_metered());
        assert!(!UsageAction::VaultAccess.is_metered());
        assert!(!UsageAction::QuizAttempt.is_metered());
    }

    #[test]
    fn action_string_roundtrip() {
        for action in UsageAction::ALL {
            assert_eq!(UsageAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(UsageAction::parse("email_send"), None);
    }
}
