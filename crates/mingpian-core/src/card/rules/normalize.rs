//! Per-field value normalization.

use crate::models::card::FieldName;
use crate::models::config::default_placeholders;

use super::patterns::EMAIL;
use super::sanitize::sanitize;

/// Characters trimmed from both ends of generic text fields.
const TRIM_CHARS: &[char] = &[
    '-', '_', '.', ',', ';', ':', '/', '\\', '|', '*', '~', '#', '>', ' ', '：', '；', '，', '。',
    '、', '\u{3000}',
];

/// Normalizes raw field values into their stored form.
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    placeholders: Vec<String>,
}

impl FieldNormalizer {
    /// Create a normalizer with the default placeholder table.
    pub fn new() -> Self {
        Self {
            placeholders: default_placeholders(),
        }
    }

    /// Replace the placeholder table.
    pub fn with_placeholders<I, S>(mut self, placeholders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.placeholders = placeholders
            .into_iter()
            .map(|p| p.into().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        self
    }

    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Normalize one raw value for `field`.
    ///
    /// Returns `""` for absent, placeholder or malformed values, otherwise a
    /// value satisfying the field's shape rule. Repeated application does not
    /// change the result.
    pub fn normalize(&self, field: FieldName, raw: &str) -> String {
        let mut current = self.normalize_once(field, raw);
        while !current.is_empty() {
            let next = self.normalize_once(field, &current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn normalize_once(&self, field: FieldName, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let cleaned = sanitize(raw);
        if self.is_placeholder(&cleaned) {
            return String::new();
        }

        match field {
            FieldName::Email => extract_email(&cleaned),
            FieldName::Mobile | FieldName::CompanyPhone => extract_phone_digits(&cleaned),
            _ => trim_text(&cleaned),
        }
    }

    fn is_placeholder(&self, value: &str) -> bool {
        let value = value.trim();
        self.placeholders.iter().any(|p| p == value)
    }
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a value with the default placeholder table.
pub fn normalize_field(field: FieldName, raw: &str) -> String {
    FieldNormalizer::new().normalize(field, raw)
}

/// First email-shaped substring, or `""`.
pub fn extract_email(text: &str) -> String {
    EMAIL
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Digits with an optional leading `+`, or `""` when no digit is present.
pub fn extract_phone_digits(text: &str) -> String {
    let mut out = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() || (c == '+' && out.is_empty()) {
            out.push(c);
        }
    }

    if out.chars().any(|c| c.is_ascii_digit()) {
        out
    } else {
        String::new()
    }
}

fn trim_text(text: &str) -> String {
    let trimmed = text.trim_matches(TRIM_CHARS);
    if trimmed.chars().any(is_meaningful_char) {
        trimmed.to_string()
    } else {
        String::new()
    }
}

fn is_meaningful_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{4e00}'..='\u{9fff}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_become_empty() {
        assert_eq!(normalize_field(FieldName::Fax, "未顯示"), "");
        assert_eq!(normalize_field(FieldName::Company, " **未填公司** "), "");
        assert_eq!(normalize_field(FieldName::Mobile, "(未顯示)"), "");
        assert_eq!(normalize_field(FieldName::Name, "未顯示的人"), "未顯示的人");
    }

    #[test]
    fn test_custom_placeholders() {
        let normalizer = FieldNormalizer::new().with_placeholders(["無", " N/A "]);
        assert_eq!(normalizer.normalize(FieldName::Fax, "無"), "");
        assert_eq!(normalizer.normalize(FieldName::Title, "N/A"), "");
        assert_eq!(normalizer.normalize(FieldName::Title, "未顯示"), "未顯示");
    }

    #[test]
    fn test_email_extraction() {
        assert_eq!(
            normalize_field(FieldName::Email, "contact: john@x.com, extra text"),
            "john@x.com"
        );
        assert_eq!(
            normalize_field(FieldName::Email, "[ivy@acme.com.tw](mailto:ivy@acme.com.tw)"),
            "ivy@acme.com.tw"
        );
        assert_eq!(normalize_field(FieldName::Email, "no address here"), "");
    }

    #[test]
    fn test_phone_digits() {
        assert_eq!(normalize_field(FieldName::Mobile, "0912-345-678"), "0912345678");
        assert_eq!(
            normalize_field(FieldName::CompanyPhone, "+886 (2) 2345-6789 #12"),
            "+88622345678912"
        );
        assert_eq!(normalize_field(FieldName::Mobile, "09+12"), "0912");
        assert_eq!(normalize_field(FieldName::Mobile, "+"), "");
        assert_eq!(normalize_field(FieldName::Mobile, "請洽總機"), "");
    }

    #[test]
    fn test_generic_trim_and_noise() {
        assert_eq!(normalize_field(FieldName::Title, "：業務經理；"), "業務經理");
        assert_eq!(normalize_field(FieldName::Company, "- ACME Co., Ltd."), "ACME Co., Ltd");
        assert_eq!(normalize_field(FieldName::Address, "--- / ---"), "");
        assert_eq!(normalize_field(FieldName::Fax, "（）"), "");
        assert_eq!(normalize_field(FieldName::TaxId, "12345678"), "12345678");
    }

    #[test]
    fn test_idempotent_across_fields() {
        let samples = [
            "-# 董事長",
            "**王小明**",
            "contact: a_b_c@x.com, extra",
            "+886 912 345 678",
            "| 台北市 | 信義區 |",
            "未顯示",
            "> - 經理",
        ];
        for field in FieldName::ALL {
            for sample in samples {
                let once = normalize_field(field, sample);
                assert_eq!(
                    normalize_field(field, &once),
                    once,
                    "{} not idempotent for {:?}",
                    field,
                    sample
                );
            }
        }
    }

    #[test]
    fn test_shape_guarantees() {
        let samples = ["x@y", "電話 +886-2-1234", "a+b@c.de / z", "", "  "];
        for sample in samples {
            let email = normalize_field(FieldName::Email, sample);
            assert!(email.is_empty() || EMAIL.find(&email).map(|m| m.as_str()) == Some(email.as_str()));

            let mobile = normalize_field(FieldName::Mobile, sample);
            let digits = mobile.strip_prefix('+').unwrap_or(&mobile);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
