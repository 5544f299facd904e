//! Error types for the mingpian-core library.
//!
//! Parsing itself never fails: unrecognized text yields an empty result.
//! These errors cover configuration loading and field-name lookups.

use thiserror::Error;

/// Main error type for the mingpian core library.
#[derive(Error, Debug)]
pub enum MingpianError {
    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A field name or label that is not one of the nine card fields.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the mingpian core library.
pub type Result<T> = std::result::Result<T, MingpianError>;
