//! Business card text parsing.

mod parser;
pub mod rules;

pub use parser::{parse_cards, CardParser, ParseResult, StandardCardParser};
