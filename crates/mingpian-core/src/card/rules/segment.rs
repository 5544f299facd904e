//! Card boundary detection.

use regex::Regex;

use super::patterns::CARD_HEADING;

/// A span of source text believed to describe one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCardBlock<'a> {
    /// Position of the card in the input (0-based).
    pub index: usize,
    /// Heading that opened the card, e.g. `名片二：`.
    pub heading: &'a str,
    /// Card number decoded from the heading numeral.
    pub number: Option<u32>,
    /// Card text from the heading up to the next heading or end of input.
    pub text: &'a str,
    /// Byte offset of `text` in the input.
    pub offset: usize,
}

impl RawCardBlock<'_> {
    /// Label used in log messages and warnings.
    pub fn display_name(&self) -> String {
        match self.number {
            Some(n) => format!("card {}", n),
            None => format!("card #{}", self.index + 1),
        }
    }
}

/// Splits text into card blocks on `名片N：` headings.
#[derive(Debug, Clone)]
pub struct CardSegmenter {
    heading: Regex,
}

impl CardSegmenter {
    /// Create a segmenter for the standard heading convention.
    pub fn new() -> Self {
        Self {
            heading: CARD_HEADING.clone(),
        }
    }

    /// Use a different heading pattern. Capture group 1, when present, is
    /// decoded as a CJK numeral. `StandardCardParser::with_heading_pattern`
    /// sets the extractor's boundary to the same pattern.
    pub fn with_pattern(mut self, heading: Regex) -> Self {
        self.heading = heading;
        self
    }

    pub fn heading_pattern(&self) -> &Regex {
        &self.heading
    }

    /// Split `text` into card blocks. Text before the first heading is
    /// ignored; no headings means no blocks.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<RawCardBlock<'a>> {
        let headings: Vec<_> = self.heading.captures_iter(text).collect();
        let mut blocks = Vec::with_capacity(headings.len());

        for (index, caps) in headings.iter().enumerate() {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let end = headings
                .get(index + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(text.len());

            blocks.push(RawCardBlock {
                index,
                heading: whole.as_str(),
                number: caps.get(1).and_then(|m| parse_cjk_numeral(m.as_str())),
                text: &text[whole.start()..end],
                offset: whole.start(),
            });
        }

        blocks
    }
}

impl Default for CardSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split text into card blocks with the standard heading convention.
pub fn segment_cards(text: &str) -> Vec<RawCardBlock<'_>> {
    CardSegmenter::new().segment(text)
}

/// Decode a CJK numeral such as `十二` or `一百零五`.
pub fn parse_cjk_numeral(numeral: &str) -> Option<u32> {
    if numeral.is_empty() {
        return None;
    }

    let mut total = 0u32;
    let mut digit = 0u32;

    for c in numeral.chars() {
        match c {
            '零' | '〇' => digit = 0,
            '一' => digit = 1,
            '二' | '兩' => digit = 2,
            '三' => digit = 3,
            '四' => digit = 4,
            '五' => digit = 5,
            '六' => digit = 6,
            '七' => digit = 7,
            '八' => digit = 8,
            '九' => digit = 9,
            '十' | '百' => {
                let unit = if c == '十' { 10 } else { 100 };
                total += digit.max(1) * unit;
                digit = 0;
            }
            _ => return None,
        }
    }

    Some(total + digit)
}
