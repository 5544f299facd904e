//! Card parser tying segmentation, extraction and expansion together.

use std::time::Instant;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::card::{ParsedBatch, PersonRecord};
use crate::models::config::ExtractionConfig;

use super::rules::{CardFieldExtractor, CardSegmenter, MultiPersonExpander};

/// Result of parsing one text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseResult {
    /// Person records in card order, then name order.
    pub records: ParsedBatch,
    /// Number of card headings found.
    pub cards_found: usize,
    /// Cards that produced no record (no usable name).
    pub cards_skipped: usize,
    /// Human-readable notes about skipped input.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for business card parsing.
pub trait CardParser {
    /// Parse every card in `text`. Never fails; unrecognized input yields an
    /// empty result with warnings.
    fn parse(&self, text: &str) -> ParseResult;
}

/// Segment, extract and expand with one shared configuration.
#[derive(Debug, Clone)]
pub struct StandardCardParser {
    segmenter: CardSegmenter,
    extractor: CardFieldExtractor,
    expander: MultiPersonExpander,
}

impl StandardCardParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            segmenter: CardSegmenter::new(),
            extractor: CardFieldExtractor::from_config(config),
            expander: MultiPersonExpander::from_config(config),
        }
    }

    /// Recognize cards by a different heading pattern. Segmentation and
    /// value boundaries both follow it.
    pub fn with_heading_pattern(mut self, heading: Regex) -> Self {
        self.extractor = self.extractor.with_heading_pattern(heading.clone());
        self.segmenter = self.segmenter.with_pattern(heading);
        self
    }

    /// Parse and keep only the records.
    pub fn parse_records(&self, text: &str) -> ParsedBatch {
        self.parse(text).records
    }
}

impl Default for StandardCardParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CardParser for StandardCardParser {
    fn parse(&self, text: &str) -> ParseResult {
        let start = Instant::now();
        let mut result = ParseResult::default();

        info!("Parsing cards from {} characters of text", text.len());

        let blocks = self.segmenter.segment(text);
        result.cards_found = blocks.len();

        if blocks.is_empty() && !text.trim().is_empty() {
            result
                .warnings
                .push("No card headings (名片N：) found".to_string());
        }

        for block in &blocks {
            let info = self.extractor.extract(block.text);
            let people: Vec<PersonRecord> = self.expander.expand(&info);

            debug!(
                "{}: {} fields, {} people",
                block.display_name(),
                info.len(),
                people.len()
            );

            if people.is_empty() {
                warn!("Skipping {}: no name found", block.display_name());
                result.cards_skipped += 1;
                result
                    .warnings
                    .push(format!("{} ({}) has no name", block.display_name(), block.heading));
                continue;
            }

            result.records.extend(people);
        }

        result.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Parsed {} records from {} cards ({} skipped) in {}ms",
            result.records.len(),
            result.cards_found,
            result.cards_skipped,
            result.processing_time_ms
        );

        result
    }
}

/// Parse `text` with default settings.
pub fn parse_cards(text: &str) -> ParsedBatch {
    StandardCardParser::new().parse_records(text)
}
