//! Common regex patterns for business card text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Card heading: 名片一： / 名片十二: / 名片 三 ：
    pub static ref CARD_HEADING: Regex = Regex::new(
        r"名片[ \t]*([一二三四五六七八九十百零〇兩]+)[ \t]*[:：]"
    ).unwrap();

    // Markdown decoration, applied in this order
    pub static ref INLINE_CODE: Regex = Regex::new(r"`([^`]+)`").unwrap();
    pub static ref BOLD: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    pub static ref ITALIC: Regex = Regex::new(r"\*([^*]+)\*").unwrap();
    pub static ref BOLD_UNDERSCORE: Regex = Regex::new(r"__([^_]+)__").unwrap();
    pub static ref ITALIC_UNDERSCORE: Regex = Regex::new(r"_([^_]+)_").unwrap();
    pub static ref STRIKETHROUGH: Regex = Regex::new(r"~~([^~]+)~~").unwrap();
    pub static ref MARKDOWN_LINK: Regex = Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap();
    pub static ref MAILTO: Regex = Regex::new(r"(?i)mailto:\s*").unwrap();
    pub static ref HEADING_MARKER: Regex = Regex::new(r"(?m)^\s*#+\s*").unwrap();
    pub static ref LIST_MARKER: Regex = Regex::new(r"(?m)^\s*(?:[-*+]\s+|\d+\.\s+)").unwrap();
    pub static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // Email shape: local@domain.tld
    pub static ref EMAIL: Regex = Regex::new(
        r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"
    ).unwrap();

    // Separators between people in the person-level fields
    pub static ref NAME_SEPARATOR: Regex = Regex::new(r"[/／、,，]|\s+").unwrap();
    pub static ref NAME_SEPARATOR_NO_SPACE: Regex = Regex::new(r"[/／、,，]").unwrap();
    pub static ref TITLE_SEPARATOR: Regex = Regex::new(r"[ \t]*[/／][ \t]*|\r?\n").unwrap();
    // An opening parenthesis only separates after whitespace: `0912… (0922…)`
    // splits, `(02) 2345-6789` and `+886(912)345-678` stay whole.
    pub static ref MOBILE_SEPARATOR: Regex = Regex::new(r"[/／、,，;；]|\s+[(（]").unwrap();
    pub static ref EMAIL_SEPARATOR: Regex = Regex::new(r"[/／、,，;；\s]+").unwrap();
}
