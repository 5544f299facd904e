//! Expansion of multi-person cards into one record per person.

use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::models::card::{CardInfo, FieldName, PersonRecord};
use crate::models::config::ExtractionConfig;

use super::normalize::{extract_email, FieldNormalizer};
use super::patterns::{
    EMAIL_SEPARATOR, MARKDOWN_LINK, MOBILE_SEPARATOR, NAME_SEPARATOR, NAME_SEPARATOR_NO_SPACE,
    TITLE_SEPARATOR,
};

/// Turns one card's raw values into person records.
///
/// Names drive the expansion: each name yields one record carrying the
/// company-level fields. Titles fall back to the first title when there are
/// fewer titles than names; mobiles and emails are matched by position only,
/// unless `shared_contact_fallback` is set and exactly one value was given.
#[derive(Debug, Clone)]
pub struct MultiPersonExpander {
    normalizer: FieldNormalizer,
    split_names_on_whitespace: bool,
    shared_contact_fallback: bool,
}

impl MultiPersonExpander {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            normalizer: FieldNormalizer::new().with_placeholders(config.placeholders.iter().cloned()),
            split_names_on_whitespace: config.split_names_on_whitespace,
            shared_contact_fallback: config.shared_contact_fallback,
        }
    }

    pub fn normalizer(&self) -> &FieldNormalizer {
        &self.normalizer
    }

    /// Expand one card. A card without a usable name yields no records.
    pub fn expand(&self, info: &CardInfo) -> Vec<PersonRecord> {
        let names = self.split_field(FieldName::Name, info.get(FieldName::Name));
        if names.is_empty() {
            return Vec::new();
        }

        let titles = self.split_field(FieldName::Title, info.get(FieldName::Title));
        let mobiles = self.split_field(FieldName::Mobile, info.get(FieldName::Mobile));
        let emails = self.split_field(FieldName::Email, info.get(FieldName::Email));

        let mut shared = PersonRecord::default();
        for field in FieldName::COMPANY_LEVEL {
            shared.set(field, self.normalizer.normalize(field, info.get(field)));
        }

        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let mut record = shared.clone();
                record.name = name;
                record.title = titles.get(i).or(titles.first()).cloned().unwrap_or_default();
                record.mobile = self.contact_at(&mobiles, i);
                record.email = self.contact_at(&emails, i);
                self.finalize(record)
            })
            .collect()
    }

    /// Split a raw person-level value into normalized, non-empty pieces.
    ///
    /// Company-level fields are never split and yield at most one piece.
    /// Pieces keep their position; only empty ones are dropped.
    pub fn split_field(&self, field: FieldName, raw: &str) -> Vec<String> {
        let raw = match field {
            FieldName::Email => collapse_email_links(raw),
            _ => Cow::Borrowed(raw),
        };
        let pieces: Vec<&str> = match self.separator(field) {
            Some(separator) => separator.split(&raw).collect(),
            None => vec![&*raw],
        };

        pieces
            .into_iter()
            .map(|piece| self.normalizer.normalize(field, piece))
            .filter(|value| !value.is_empty())
            .collect()
    }

    fn separator(&self, field: FieldName) -> Option<&'static Regex> {
        match field {
            FieldName::Name if self.split_names_on_whitespace => Some(&*NAME_SEPARATOR),
            FieldName::Name => Some(&*NAME_SEPARATOR_NO_SPACE),
            FieldName::Title => Some(&*TITLE_SEPARATOR),
            FieldName::Mobile => Some(&*MOBILE_SEPARATOR),
            FieldName::Email => Some(&*EMAIL_SEPARATOR),
            _ => None,
        }
    }

    fn contact_at(&self, values: &[String], index: usize) -> String {
        match values.get(index) {
            Some(value) => value.clone(),
            None if self.shared_contact_fallback && values.len() == 1 => values[0].clone(),
            None => String::new(),
        }
    }

    /// Re-run normalization over every field of an assembled record.
    fn finalize(&self, mut record: PersonRecord) -> PersonRecord {
        for field in FieldName::ALL {
            let value = self.normalizer.normalize(field, record.get(field));
            record.set(field, value);
        }
        record
    }
}

/// Replace each Markdown link with the address it points to, or its label
/// when the target holds no address, so one link is one email.
fn collapse_email_links(raw: &str) -> Cow<'_, str> {
    MARKDOWN_LINK.replace_all(raw, |caps: &Captures| {
        let target = extract_email(&caps[2]);
        if target.is_empty() {
            caps[1].to_string()
        } else {
            target
        }
    })
}

impl Default for MultiPersonExpander {
    fn default() -> Self {
        Self::new()
    }
}
