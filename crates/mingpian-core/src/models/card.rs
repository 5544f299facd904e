//! Business card data models.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MingpianError;

/// One of the nine fields recorded for every card.
///
/// Variants are declared in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    /// Company name (公司名稱).
    Company,
    /// Company address (地址).
    Address,
    /// Taiwanese unified business number (統一編號).
    TaxId,
    /// Company switchboard number (公司電話).
    CompanyPhone,
    /// Fax number (傳真).
    Fax,
    /// Job title (職稱).
    Title,
    /// Person name (姓名).
    Name,
    /// Mobile number (手機).
    Mobile,
    /// Email address.
    Email,
}

impl FieldName {
    /// All fields in canonical order.
    pub const ALL: [FieldName; 9] = [
        FieldName::Company,
        FieldName::Address,
        FieldName::TaxId,
        FieldName::CompanyPhone,
        FieldName::Fax,
        FieldName::Title,
        FieldName::Name,
        FieldName::Mobile,
        FieldName::Email,
    ];

    /// Fields shared by every person on a card.
    pub const COMPANY_LEVEL: [FieldName; 5] = [
        FieldName::Company,
        FieldName::Address,
        FieldName::TaxId,
        FieldName::CompanyPhone,
        FieldName::Fax,
    ];

    /// Snake-case key used in serialized records.
    pub fn key(self) -> &'static str {
        match self {
            FieldName::Company => "company",
            FieldName::Address => "address",
            FieldName::TaxId => "tax_id",
            FieldName::CompanyPhone => "company_phone",
            FieldName::Fax => "fax",
            FieldName::Title => "title",
            FieldName::Name => "name",
            FieldName::Mobile => "mobile",
            FieldName::Email => "email",
        }
    }

    /// Label that introduces the field in card text. Also the store column name.
    pub fn label(self) -> &'static str {
        match self {
            FieldName::Company => "公司名稱",
            FieldName::Address => "地址",
            FieldName::TaxId => "統一編號",
            FieldName::CompanyPhone => "公司電話",
            FieldName::Fax => "傳真",
            FieldName::Title => "職稱",
            FieldName::Name => "姓名",
            FieldName::Mobile => "手機",
            FieldName::Email => "Email",
        }
    }

    /// Whether the value is shared by every person on the card.
    pub fn is_company_level(self) -> bool {
        Self::COMPANY_LEVEL.contains(&self)
    }

    /// Whether the value is reduced to digits (and a leading `+`).
    pub fn is_phone(self) -> bool {
        matches!(self, FieldName::Mobile | FieldName::CompanyPhone)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldName {
    type Err = MingpianError;

    /// Accepts either the snake-case key or the card label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FieldName::ALL
            .into_iter()
            .find(|field| {
                field.key() == s
                    || field.label() == s
                    || (*field == FieldName::Email && s.eq_ignore_ascii_case("email"))
            })
            .ok_or_else(|| MingpianError::UnknownField(s.to_string()))
    }
}

/// Raw field values recovered from one card block, before person-expansion.
///
/// Holds at most one value per field. Values are not yet normalized so that
/// separators between several people are still present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardInfo {
    values: HashMap<FieldName, String>,
}

impl CardInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for a field, `""` when absent.
    pub fn get(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Store a value unless the field already has one (first occurrence wins).
    pub fn insert(&mut self, field: FieldName, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() || self.values.contains_key(&field) {
            return false;
        }
        self.values.insert(field, value);
        true
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.values.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One output row: a single person with their company's shared fields.
///
/// Every record carries all nine fields; absent values are `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonRecord {
    pub company: String,
    pub address: String,
    pub tax_id: String,
    pub company_phone: String,
    pub fax: String,
    pub title: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
}

impl PersonRecord {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Company => &self.company,
            FieldName::Address => &self.address,
            FieldName::TaxId => &self.tax_id,
            FieldName::CompanyPhone => &self.company_phone,
            FieldName::Fax => &self.fax,
            FieldName::Title => &self.title,
            FieldName::Name => &self.name,
            FieldName::Mobile => &self.mobile,
            FieldName::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::Company => &mut self.company,
            FieldName::Address => &mut self.address,
            FieldName::TaxId => &mut self.tax_id,
            FieldName::CompanyPhone => &mut self.company_phone,
            FieldName::Fax => &mut self.fax,
            FieldName::Title => &mut self.title,
            FieldName::Name => &mut self.name,
            FieldName::Mobile => &mut self.mobile,
            FieldName::Email => &mut self.email,
        };
        *slot = value.into();
    }

    /// Iterate `(field, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        FieldName::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// Field map keyed by card labels, as written to the store.
    pub fn to_labeled_fields(&self) -> Map<String, Value> {
        self.iter()
            .map(|(field, value)| (field.label().to_string(), Value::String(value.to_string())))
            .collect()
    }

    /// Build a record from a store row keyed by card labels.
    ///
    /// Missing or non-string cells become `""`.
    pub fn from_labeled_fields(fields: &Map<String, Value>) -> Self {
        let mut record = PersonRecord::default();
        for field in FieldName::ALL {
            if let Some(Value::String(value)) = fields.get(field.label()) {
                record.set(field, value.clone());
            }
        }
        record
    }
}

/// Records produced by one parse call, in card order then name order.
pub type ParsedBatch = Vec<PersonRecord>;
