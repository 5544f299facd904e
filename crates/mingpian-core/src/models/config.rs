//! Configuration structures for parsing and the record store.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MingpianError, Result};

/// Largest batch the Airtable create endpoint accepts.
pub const MAX_BATCH_SIZE: usize = 10;

/// Largest page the Airtable list endpoint returns.
pub const MAX_PAGE_SIZE: usize = 100;

/// Main configuration for mingpian.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MingpianConfig {
    /// Card text extraction configuration.
    pub extraction: ExtractionConfig,

    /// Record store configuration.
    pub store: StoreConfig,
}

/// Card text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Literal values meaning "not shown on the card". Matching values become empty.
    pub placeholders: Vec<String>,

    /// Filler tokens stripped from the start of a captured value.
    pub filler_markers: Vec<String>,

    /// Treat whitespace inside the name field as a separator between people.
    pub split_names_on_whitespace: bool,

    /// Let mobile and email fall back to a single shared value, like title does.
    pub shared_contact_fallback: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            placeholders: default_placeholders(),
            filler_markers: vec!["項目內容".to_string(), "欄位內容".to_string()],
            split_names_on_whitespace: true,
            shared_contact_fallback: false,
        }
    }
}

/// Placeholder literals seen in card transcriptions.
pub fn default_placeholders() -> Vec<String> {
    ["名片上未顯示", "未顯示", "未填公司", "未填姓名", "(未顯示)", "（未顯示）"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Record store (Airtable) configuration.
///
/// Credentials are not part of this struct; the writer receives them at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the REST API.
    pub api_url: String,

    /// Table that receives the records.
    pub table_name: String,

    /// Records per create request (1-10).
    pub batch_size: usize,

    /// Records per page when searching (1-100).
    pub page_size: usize,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.airtable.com/v0".to_string(),
            table_name: "名片王".to_string(),
            batch_size: MAX_BATCH_SIZE,
            page_size: MAX_PAGE_SIZE,
            request_timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    /// Check limits imposed by the store API.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(MingpianError::Config(format!(
                "store.batch_size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, self.batch_size
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(MingpianError::Config(format!(
                "store.page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.table_name.trim().is_empty() {
            return Err(MingpianError::Config("store.table_name is empty".to_string()));
        }
        if self.api_url.trim().is_empty() {
            return Err(MingpianError::Config("store.api_url is empty".to_string()));
        }
        Ok(())
    }
}

impl MingpianConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
