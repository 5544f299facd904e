//! Data models for business cards and configuration.

pub mod card;
pub mod config;

pub use card::{CardInfo, FieldName, ParsedBatch, PersonRecord};
pub use config::{ExtractionConfig, MingpianConfig, StoreConfig};
