//! Record store backends.

mod airtable;
mod memory;

use std::future::Future;

use mingpian_core::PersonRecord;
use serde::{Deserialize, Serialize};

use crate::Result;

pub use airtable::AirtableStore;
pub use memory::MemoryStore;

/// A record as kept by a store, with the store's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub record: PersonRecord,
}

/// Trait for tabular stores that accept person records.
///
/// Implementations do not retry; the first failure is returned unchanged.
pub trait RecordStore: Send + Sync {
    /// Create one group of records, returning how many were stored.
    fn create_records(
        &self,
        records: &[PersonRecord],
    ) -> impl Future<Output = Result<usize>> + Send;

    /// Records whose company or name contains `term`.
    fn search(&self, term: &str) -> impl Future<Output = Result<Vec<StoredRecord>>> + Send;
}
