//! Error kinds surfaced by ledger, wallet and storage operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JamaeyaError {
    /// Operation referenced a group id that does not exist.
    #[error("group not found: {0}")]
    NotFound(String),

    /// Join attempted with an unrecognized invite code.
    #[error("invalid invite code: {0}")]
    InvalidCode(String),

    /// Input outside the allowed ranges (member count, amount, blank fields, malformed ids).
    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store lock poisoned")]
    LockPoisoned,
}

pub type Result<T, E = JamaeyaError> = std::result::Result<T, E>;

impl JamaeyaError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        JamaeyaError::Validation(msg.into())
    }

    /// True for errors the user caused and can fix by re-entering input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            JamaeyaError::NotFound(_) | JamaeyaError::InvalidCode(_) | JamaeyaError::Validation(_)
        )
    }
}
