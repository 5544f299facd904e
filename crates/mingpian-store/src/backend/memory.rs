//! In-process record store.

use mingpian_core::{FieldName, PersonRecord};
use tokio::sync::Mutex;
use tracing::debug;

use super::{RecordStore, StoredRecord};
use crate::{Result, StoreError};

/// Keeps records in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far, in insertion order.
    pub async fn records(&self) -> Vec<StoredRecord> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl RecordStore for MemoryStore {
    async fn create_records(&self, records: &[PersonRecord]) -> Result<usize> {
        let mut stored = self.records.lock().await;
        for record in records {
            let id = format!("mem{:06}", stored.len() + 1);
            stored.push(StoredRecord {
                id,
                record: record.clone(),
            });
        }
        debug!("Stored {} records in memory ({} total)", records.len(), stored.len());
        Ok(records.len())
    }

    async fn search(&self, term: &str) -> Result<Vec<StoredRecord>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(StoreError::InvalidQuery("search term is empty".to_string()));
        }

        let stored = self.records.lock().await;
        Ok(stored
            .iter()
            .filter(|s| {
                s.record.get(FieldName::Company).contains(term)
                    || s.record.get(FieldName::Name).contains(term)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(company: &str, name: &str) -> PersonRecord {
        PersonRecord {
            company: company.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_in_order() {
        let store = MemoryStore::new();
        let written = store
            .create_records(&[person("ACME", "王小明"), person("ACME", "陳大文")])
            .await
            .unwrap();

        assert_eq!(written, 2);
        let records = store.records().await;
        assert_eq!(records[0].id, "mem000001");
        assert_eq!(records[1].record.name, "陳大文");
    }

    #[tokio::test]
    async fn test_search_company_or_name() {
        let store = MemoryStore::new();
        store
            .create_records(&[
                person("ACME 科技", "王小明"),
                person("Globex", "陳大文"),
                person("Initech", "林美華"),
            ])
            .await
            .unwrap();

        let hits = store.search("ACME").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.name, "王小明");

        let hits = store.search("大文").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.company, "Globex");

        assert!(store.search("Nobody").await.unwrap().is_empty());
        assert!(matches!(
            store.search("  ").await,
            Err(StoreError::InvalidQuery(_))
        ));
    }
}
