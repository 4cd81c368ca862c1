//! Typed error enum for the service layer.

use catalog_search_storage::StorageError;
use thiserror::Error;

/// Service-layer error: storage failures plus caller mistakes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, corrupt row).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (no names, empty change set).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::InvalidInput(_) => false,
        }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }
}
