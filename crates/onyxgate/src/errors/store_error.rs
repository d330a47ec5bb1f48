//! Persistence-seam errors for `UsageStore` implementations.

use super::error_code::{self, GateErrorCode};

/// Errors a usage store implementation can surface.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("Write conflict for user {user_id} (concurrent update)")]
    WriteConflict { user_id: String },

    #[error("User {user_id} not found")]
    UserNotFound { user_id: String },

    #[error("Storage error: {message}")]
    Other { message: String },
}

impl GateErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => error_code::STORE_UNAVAILABLE,
            Self::WriteConflict { .. } => error_code::STORE_WRITE_CONFLICT,
            Self::UserNotFound { .. } => error_code::STORE_USER_NOT_FOUND,
            Self::Other { .. } => error_code::STORE_ERROR,
        }
    }
}
