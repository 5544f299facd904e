//! WASM bindings for business card text parsing.
//!
//! This crate provides WebAssembly bindings so a browser front end can
//! preview parsed records before they are uploaded.

use wasm_bindgen::prelude::*;

use mingpian_core::{CardParser as _, ExtractionConfig, FieldName, StandardCardParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse card text into an array of person records.
#[wasm_bindgen]
pub fn parse_cards(text: &str) -> Result<JsValue, JsValue> {
    to_js(&mingpian_core::parse_cards(text))
}

/// Parse card text and return records with card counts, warnings and timing.
#[wasm_bindgen]
pub fn parse_cards_with_metadata(text: &str) -> Result<JsValue, JsValue> {
    to_js(&StandardCardParser::new().parse(text))
}

/// Normalize one value. `field` is a key (`mobile`) or a card label (`手機`).
#[wasm_bindgen]
pub fn normalize_field(field: &str, value: &str) -> Result<String, JsValue> {
    let field: FieldName = field
        .parse()
        .map_err(|e: mingpian_core::MingpianError| JsValue::from_str(&e.to_string()))?;
    Ok(mingpian_core::normalize_field(field, value))
}

/// Strip Markdown/HTML decoration and collapse whitespace.
#[wasm_bindgen]
pub fn sanitize(text: &str) -> String {
    mingpian_core::sanitize(text)
}

/// Card labels in canonical field order, for table headers.
#[wasm_bindgen]
pub fn field_labels() -> js_sys::Array {
    FieldName::ALL
        .iter()
        .map(|field| JsValue::from_str(field.label()))
        .collect()
}

/// Configurable card parser for browser use.
#[wasm_bindgen]
pub struct CardParser {
    config: ExtractionConfig,
    parser: StandardCardParser,
    log_warnings: bool,
}

#[wasm_bindgen]
impl CardParser {
    /// Create a parser with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = ExtractionConfig::default();
        Self {
            parser: StandardCardParser::from_config(&config),
            config,
            log_warnings: false,
        }
    }

    /// Treat `value` as "not shown on the card".
    #[wasm_bindgen]
    pub fn add_placeholder(&mut self, value: &str) {
        let value = value.trim();
        if !value.is_empty() && !self.config.placeholders.iter().any(|p| p == value) {
            self.config.placeholders.push(value.to_string());
            self.rebuild();
        }
    }

    /// Current placeholder literals.
    #[wasm_bindgen]
    pub fn placeholders(&self) -> js_sys::Array {
        self.config
            .placeholders
            .iter()
            .map(|p| JsValue::from_str(p))
            .collect()
    }

    /// Configure whether whitespace separates people in the name field.
    #[wasm_bindgen]
    pub fn set_split_names_on_whitespace(&mut self, split: bool) {
        self.config.split_names_on_whitespace = split;
        self.rebuild();
    }

    /// Let a single mobile or email be shared by every person on a card.
    #[wasm_bindgen]
    pub fn set_shared_contact_fallback(&mut self, shared: bool) {
        self.config.shared_contact_fallback = shared;
        self.rebuild();
    }

    /// Echo parse warnings to the browser console.
    #[wasm_bindgen]
    pub fn set_log_warnings(&mut self, log: bool) {
        self.log_warnings = log;
    }

    /// Parse card text into an array of person records.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.run(text);
        to_js(&result.records)
    }

    /// Parse card text and return records with metadata.
    #[wasm_bindgen]
    pub fn parse_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.run(text))
    }

    fn run(&self, text: &str) -> mingpian_core::ParseResult {
        let result = self.parser.parse(text);
        if self.log_warnings {
            for warning in &result.warnings {
                web_sys::console::warn_1(&JsValue::from_str(warning));
            }
        }
        result
    }

    fn rebuild(&mut self) {
        self.parser = StandardCardParser::from_config(&self.config);
    }
}

impl Default for CardParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mingpian_core::{ParseResult, PersonRecord};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const TWO_PEOPLE: &str =
        "名片一：公司名稱：ACME 姓名：王小明/陳大文 手機：0912345678/0922333444";

    #[wasm_bindgen_test]
    fn test_parse_cards() {
        let value = parse_cards(TWO_PEOPLE).unwrap();
        let records: Vec<PersonRecord> = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].mobile, "0922333444");
    }

    #[wasm_bindgen_test]
    fn test_parse_with_metadata() {
        let value = parse_cards_with_metadata("名片一：公司名稱：ACME").unwrap();
        let result: ParseResult = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(result.cards_found, 1);
        assert_eq!(result.cards_skipped, 1);
    }

    #[wasm_bindgen_test]
    fn test_normalize_field() {
        assert_eq!(normalize_field("手機", "0912-345-678").unwrap(), "0912345678");
        assert_eq!(normalize_field("email", "mail: a@b.co").unwrap(), "a@b.co");
        assert!(normalize_field("phone", "123").is_err());
    }

    #[wasm_bindgen_test]
    fn test_card_parser_settings() {
        let mut parser = CardParser::new();
        parser.add_placeholder("無");
        parser.set_shared_contact_fallback(true);

        let value = parser
            .parse("名片一：姓名：王小明/陳大文 手機：0912345678 傳真：無")
            .unwrap();
        let records: Vec<PersonRecord> = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(records[1].mobile, "0912345678");
        assert_eq!(records[0].fax, "");
    }

    #[wasm_bindgen_test]
    fn test_field_labels() {
        let labels = field_labels();
        assert_eq!(labels.length(), 9);
        assert_eq!(labels.get(6).as_string().unwrap(), "姓名");
    }
}
