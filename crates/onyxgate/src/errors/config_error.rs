//! Plan-configuration loading errors.

use super::error_code::{self, GateErrorCode};

/// Errors that can occur while loading plan-limit overrides.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read plan config: {message}")]
    Io { message: String },

    #[error("Plan config parse failed: {message}")]
    Parse { message: String },

    #[error("Invalid daily generation limit for {tier}: {value} (must be >= -1)")]
    InvalidLimit { tier: String, value: i64 },

    #[error("Invalid soft-cap warning ratio for {tier}: {value} (must be in (0, 1])")]
    InvalidRatio { tier: String, value: f64 },
}

impl GateErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::CONFIG_IO,
            Self::Parse { .. } => error_code::CONFIG_PARSE,
            Self::InvalidLimit { .. } => error_code::CONFIG_INVALID_LIMIT,
            Self::InvalidRatio { .. } => error_code::CONFIG_INVALID_RATIO,
        }
    }
}
