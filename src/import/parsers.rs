//! Deck-list line formats, tried in priority order.
//!
//! Each parser is a plain function from one trimmed line to a
//! [`ParsedLine`]. New formats are added by appending to [`PARSERS`].

use lazy_static::lazy_static;
use regex::Regex;

use super::NameIndex;

lazy_static! {
    static ref COUNTED: Regex = Regex::new(r"^(\d+)\s+(.+)$").unwrap();
    static ref BRACKETED_SET: Regex =
        Regex::new(r"^(SB:\s*)?(\d+)\s+\[[^\]]*\]\s+(.+)$").unwrap();
    static ref PARENTHESIZED_SET: Regex =
        Regex::new(r"^(\d+)\s+(.+?)\s+\(([A-Za-z0-9]+)\)\s+(\S+)$").unwrap();
}

/// A line recognized by one of the parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub oracle_id: String,
    pub amount: u32,
    /// Printing pin, empty when the format does not resolve one.
    pub printing_id: String,
    /// `SB:` marker seen. Not yet carried into collections.
    pub sideboard: bool,
    /// Set code and collector number written on the line, if any.
    /// Not yet used to pin a printing.
    pub set_code: Option<String>,
    pub collector_number: Option<String>,
}

impl ParsedLine {
    fn new(oracle_id: &str, amount: u32) -> Self {
        Self {
            oracle_id: oracle_id.to_string(),
            amount,
            printing_id: String::new(),
            sideboard: false,
            set_code: None,
            collector_number: None,
        }
    }
}

pub type LineParser = fn(&str, &dyn NameIndex) -> Option<ParsedLine>;

/// The parser chain, highest priority first.
pub const PARSERS: &[(&str, LineParser)] = &[
    ("exact_name", exact_name),
    ("counted_name", counted_name),
    ("bracketed_set", bracketed_set),
    ("parenthesized_set", parenthesized_set),
];

/// Run the chain and return the first match with the parser's name.
pub fn parse_line(line: &str, names: &dyn NameIndex) -> Option<(&'static str, ParsedLine)> {
    PARSERS
        .iter()
        .find_map(|(name, parser)| parser(line, names).map(|parsed| (*name, parsed)))
}

fn parse_amount(digits: &str) -> Option<u32> {
    digits.parse().ok()
}

/// `Lightning Bolt`
pub fn exact_name(line: &str, names: &dyn NameIndex) -> Option<ParsedLine> {
    names
        .oracle_id_by_name(line)
        .map(|oracle_id| ParsedLine::new(oracle_id, 1))
}

/// `4 Lightning Bolt`
pub fn counted_name(line: &str, names: &dyn NameIndex) -> Option<ParsedLine> {
    let caps = COUNTED.captures(line)?;
    let amount = parse_amount(&caps[1])?;
    let oracle_id = names.oracle_id_by_name(&caps[2])?;
    Some(ParsedLine::new(oracle_id, amount))
}

/// `SB: 2 [M21] Lightning Bolt`
pub fn bracketed_set(line: &str, names: &dyn NameIndex) -> Option<ParsedLine> {
    let caps = BRACKETED_SET.captures(line)?;
    let amount = parse_amount(&caps[2])?;
    let oracle_id = names.oracle_id_by_name(&caps[3])?;
    let mut parsed = ParsedLine::new(oracle_id, amount);
    parsed.sideboard = caps.get(1).is_some();
    Some(parsed)
}

/// `4 Lightning Bolt (M21) 152`
pub fn parenthesized_set(line: &str, names: &dyn NameIndex) -> Option<ParsedLine> {
    let caps = PARENTHESIZED_SET.captures(line)?;
    let amount = parse_amount(&caps[1])?;
    let oracle_id = names.oracle_id_by_name(&caps[2])?;
    let mut parsed = ParsedLine::new(oracle_id, amount);
    parsed.set_code = Some(caps[3].to_string());
    parsed.collector_number = Some(caps[4].to_string());
    Some(parsed)
}
