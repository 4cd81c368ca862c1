use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by core domain parsing and name resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid language code: {0:?}")]
    InvalidLanguageCode(String),

    #[error("Invalid product id: {0:?}")]
    InvalidProductId(String),

    #[error("Cannot resolve name in {language}: {reason}")]
    NameResolution { language: String, reason: String },
}

pub type Result<T> = StdResult<T, CoreError>;
