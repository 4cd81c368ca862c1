//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes (missing product, transient DB
//! errors) instead of downcasting opaque boxes.

use catalog_search_core::ProductId;
use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// SQL / connection / timeout failure.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Row data could not be deserialized into domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    pub fn product_not_found(id: ProductId) -> Self {
        Self::NotFound { entity: "product", id: id.to_string() }
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        #[cfg(feature = "postgres")]
        if matches!(self, Self::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_))) {
            return true;
        }
        false
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Custom `From<sqlx::Error>`, not a blanket `#[from]`.
///
/// - `RowNotFound` -> `NotFound` (generic; callers remap with entity context)
/// - SQLSTATE 23505 -> `Duplicate`
/// - Everything else -> `Database`
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23505") => {
                Self::Duplicate(db_err.message().to_owned())
            },
            _ => Self::Database(err),
        }
    }
}

impl From<catalog_search_core::CoreError> for StorageError {
    fn from(err: catalog_search_core::CoreError) -> Self {
        Self::DataCorruption { context: "stored value violates a domain rule".to_owned(), source: Box::new(err) }
    }
}
