//! Stable string error codes for API responses and log correlation.

/// Trait for errors that carry a stable, machine-readable code.
pub trait GateErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_IO: &str = "CONFIG_IO";
pub const CONFIG_PARSE: &str = "CONFIG_PARSE";
pub const CONFIG_INVALID_LIMIT: &str = "CONFIG_INVALID_LIMIT";
pub const CONFIG_INVALID_RATIO: &str = "CONFIG_INVALID_RATIO";

pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
pub const STORE_WRITE_CONFLICT: &str = "STORE_WRITE_CONFLICT";
pub const STORE_USER_NOT_FOUND: &str = "STORE_USER_NOT_FOUND";
pub const STORE_ERROR: &str = "STORE_ERROR";
