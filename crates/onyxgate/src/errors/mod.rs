//! Error types for the ambient layers (config loading, persistence seam).
//!
//! The decision core itself is total and never errors; everything here
//! belongs to the edges around it.

pub mod config_error;
pub mod error_code;
pub mod store_error;

pub use config_error::ConfigError;
pub use error_code::GateErrorCode;
pub use store_error::StoreError;
