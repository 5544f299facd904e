//! Record store layer for mingpian.
//!
//! This crate provides:
//! - A `RecordStore` abstraction over tabular stores
//! - An Airtable REST backend and an in-memory backend
//! - A batch writer that submits records in create-many groups
//! - Credential resolution from explicit values or the environment

mod backend;
mod batch;
mod credentials;
mod error;

pub use backend::{AirtableStore, MemoryStore, RecordStore, StoredRecord};
pub use batch::{BatchWriter, WriteSummary};
pub use credentials::{Credentials, API_KEY_VAR, BASE_ID_VAR};
pub use error::StoreError;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
