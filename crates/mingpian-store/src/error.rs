//! Error types for the record store layer.

use thiserror::Error;

/// Errors raised while talking to a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required credential is absent or blank. Holds the variable name.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Connection, DNS, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Airtable API HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Store configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A query the store cannot run.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The API answered with a body that could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<mingpian_core::MingpianError> for StoreError {
    fn from(err: mingpian_core::MingpianError) -> Self {
        StoreError::Config(err.to_string())
    }
}
