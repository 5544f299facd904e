//! Batched record submission.

use mingpian_core::models::config::MAX_BATCH_SIZE;
use mingpian_core::{PersonRecord, StoreConfig};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::RecordStore;
use crate::{Result, StoreError};

/// Outcome of a completed write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    /// Records acknowledged by the store.
    pub records_written: usize,
    /// Create requests issued.
    pub batches: usize,
}

/// Writes records to a store in groups of at most `batch_size`.
///
/// Groups are sent one at a time in record order. The first failing group
/// ends the write; its error is returned unchanged and later groups are not
/// sent.
#[derive(Debug)]
pub struct BatchWriter<S> {
    store: S,
    batch_size: usize,
}

impl<S: RecordStore> BatchWriter<S> {
    /// Create a writer. `batch_size` must be between 1 and 10.
    pub fn new(store: S, batch_size: usize) -> Result<Self> {
        if !(1..=MAX_BATCH_SIZE).contains(&batch_size) {
            return Err(StoreError::Config(format!(
                "batch size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, batch_size
            )));
        }
        Ok(Self { store, batch_size })
    }

    pub fn from_config(store: S, config: &StoreConfig) -> Result<Self> {
        Self::new(store, config.batch_size)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Number of requests needed for `records` records.
    pub fn batch_count(&self, records: usize) -> usize {
        records.div_ceil(self.batch_size)
    }

    /// Write every record.
    pub async fn write(&self, records: &[PersonRecord]) -> Result<WriteSummary> {
        self.write_with_progress(records, |_| {}).await
    }

    /// Write every record, calling `on_batch` after each acknowledged group.
    pub async fn write_with_progress<F>(
        &self,
        records: &[PersonRecord],
        mut on_batch: F,
    ) -> Result<WriteSummary>
    where
        F: FnMut(&WriteSummary),
    {
        let mut summary = WriteSummary::default();
        if records.is_empty() {
            info!("No records to write");
            return Ok(summary);
        }

        let total = self.batch_count(records.len());
        info!("Writing {} records in {} batches", records.len(), total);

        for (index, chunk) in records.chunks(self.batch_size).enumerate() {
            debug!("Batch {}/{}: {} records", index + 1, total, chunk.len());

            let written = match self.store.create_records(chunk).await {
                Ok(written) => written,
                Err(err) => {
                    warn!("Batch {}/{} failed: {}", index + 1, total, err);
                    return Err(err);
                }
            };

            summary.records_written += written;
            summary.batches += 1;
            on_batch(&summary);
        }

        info!(
            "Wrote {} records in {} batches",
            summary.records_written, summary.batches
        );
        Ok(summary)
    }
}
