//! Rule-based stages of the business card pipeline.

pub mod patterns;
pub mod sanitize;
pub mod normalize;
pub mod segment;
pub mod extract;
pub mod expand;

pub use sanitize::sanitize;
pub use normalize::{extract_email, extract_phone_digits, normalize_field, FieldNormalizer};
pub use segment::{parse_cjk_numeral, segment_cards, CardSegmenter, RawCardBlock};
pub use extract::CardFieldExtractor;
pub use expand::MultiPersonExpander;

/// A value recovered from source text, with where it came from.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0). Labels followed by a colon score highest.
    pub confidence: f32,
    /// Byte span of the value in the source block.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched, label included.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
