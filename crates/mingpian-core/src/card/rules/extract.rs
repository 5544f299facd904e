//! Label-driven field extraction from one card block.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::card::{CardInfo, FieldName};
use crate::models::config::ExtractionConfig;

use super::patterns::CARD_HEADING;
use super::ExtractionMatch;

/// Characters skipped in front of a filler marker.
const FILLER_DECORATION: &[char] = &['*', '_', '~', '|', ':', '：'];

/// Confidence for a label followed by a colon.
const LABELED_CONFIDENCE: f32 = 1.0;

/// Confidence for a bare label occurrence.
const BARE_CONFIDENCE: f32 = 0.6;

/// Compiled patterns for one field.
struct FieldRule {
    field: FieldName,
    /// Label followed by a colon, optionally behind emphasis.
    labeled: Regex,
    /// Label anywhere.
    bare: Regex,
    /// Where a value for this field stops: another label with a colon, or
    /// another label at the start of a line.
    boundary: Regex,
    /// Another label at the very start of a captured value.
    leading_label: Regex,
}

/// Regex fragment matching the label of `field`.
fn label_pattern(field: FieldName) -> String {
    match field {
        FieldName::Email => r"(?i:e-?mail)".to_string(),
        _ => regex::escape(field.label()),
    }
}

fn build_rule(field: FieldName) -> FieldRule {
    let own = label_pattern(field);
    let others = FieldName::ALL
        .into_iter()
        .filter(|f| *f != field)
        .map(label_pattern)
        .collect::<Vec<_>>()
        .join("|");

    FieldRule {
        field,
        labeled: Regex::new(&format!(r"{own}[ \t*_~]*[:：](?:[ \t]*\*+)?")).unwrap(),
        bare: Regex::new(&own).unwrap(),
        boundary: Regex::new(&format!(
            r"(?m)(?:{others})[ \t*_~]*[:：]|^[\s|>*_#+\-]*(?:\d+\.)?[ \t*_]*(?:{others})"
        ))
        .unwrap(),
        leading_label: Regex::new(&format!(r"^[\s|>*_#+\-:：]*(?:{others})")).unwrap(),
    }
}

lazy_static! {
    static ref FIELD_RULES: Vec<FieldRule> = FieldName::ALL.into_iter().map(build_rule).collect();
}

fn rule_for(field: FieldName) -> &'static FieldRule {
    // ALL is in declaration order, so the enum discriminant indexes the table.
    &FIELD_RULES[field as usize]
}

/// Recovers raw field values from a card block.
///
/// A label followed by `:`/`：` is preferred over a bare occurrence. The
/// value runs up to the next label (with a colon, or at a line start), the
/// next card heading, or the end of the block, and may span lines.
#[derive(Debug, Clone)]
pub struct CardFieldExtractor {
    heading: Regex,
    filler_markers: Vec<String>,
}

impl CardFieldExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            heading: CARD_HEADING.clone(),
            filler_markers: config
                .filler_markers
                .iter()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Stop values at a different heading pattern.
    pub fn with_heading_pattern(mut self, heading: Regex) -> Self {
        self.heading = heading;
        self
    }

    /// Extract every field present in `block`.
    pub fn extract(&self, block: &str) -> CardInfo {
        let mut info = CardInfo::new();
        for field in FieldName::ALL {
            if let Some(found) = self.extract_field(block, field) {
                info.insert(field, found.value);
            }
        }
        info
    }

    /// Extract one field with the byte span of its value.
    ///
    /// Returns `None` when the label never appears. The value is trimmed but
    /// otherwise raw; it is `""` when nothing usable followed the label.
    pub fn extract_field(&self, block: &str, field: FieldName) -> Option<ExtractionMatch<String>> {
        let rule = rule_for(field);
        debug_assert_eq!(rule.field, field);

        let (label, confidence) = match rule.labeled.find(block) {
            Some(m) => (m, LABELED_CONFIDENCE),
            None => (rule.bare.find(block)?, BARE_CONFIDENCE),
        };

        let start = label.end();
        let end = self.value_end(rule, block, start);
        let value = self.strip_fillers(&block[start..end]);
        let value = if rule.leading_label.is_match(value) {
            ""
        } else {
            value.trim()
        };

        Some(
            ExtractionMatch::new(value.to_string(), confidence, &block[label.start()..end])
                .with_position(start, end),
        )
    }

    fn value_end(&self, rule: &FieldRule, block: &str, start: usize) -> usize {
        let next_label = rule.boundary.find_at(block, start).map(|m| m.start());
        let next_heading = self.heading.find_at(block, start).map(|m| m.start());
        next_label
            .into_iter()
            .chain(next_heading)
            .min()
            .unwrap_or(block.len())
    }

    fn strip_fillers<'a>(&self, raw: &'a str) -> &'a str {
        let mut value = raw;
        loop {
            let rest = value
                .trim_start_matches(|c: char| c.is_whitespace() || FILLER_DECORATION.contains(&c));
            match self
                .filler_markers
                .iter()
                .find(|marker| rest.starts_with(marker.as_str()))
            {
                Some(marker) => value = &rest[marker.len()..],
                None => return value,
            }
        }
    }
}

impl Default for CardFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}
