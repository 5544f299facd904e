//! Core library for business card (名片) text parsing.
//!
//! This crate provides:
//! - Card segmentation on `名片N：` headings
//! - Label-driven extraction of nine card fields
//! - Expansion of multi-person cards into one record per person
//! - Markdown sanitization and per-field normalization

pub mod error;
pub mod models;
pub mod card;

pub use error::{MingpianError, Result};
pub use models::card::{CardInfo, FieldName, ParsedBatch, PersonRecord};
pub use models::config::{ExtractionConfig, MingpianConfig, StoreConfig};
pub use card::{parse_cards, CardParser, ParseResult, StandardCardParser};
pub use card::rules::{normalize_field, sanitize, FieldNormalizer};
