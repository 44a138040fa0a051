//! Error types for the matching engine

use thiserror::Error;

/// Result type alias for matching operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the record matching engine.
///
/// The scoring pipeline itself never fails on messy data — unparseable
/// dates or empty token bags are reported in-band via `FieldResult::info`
/// (see `models::FieldResult`). These variants cover genuine misuse of the
/// public API.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid disregard set: {0}")]
    InvalidDisregardSet(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}
