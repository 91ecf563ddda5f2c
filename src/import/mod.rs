//! Free-text deck-list import.
//!
//! Text is split into lines and each line goes through the parser chain in
//! [`parsers`]. Recognized lines are merged into a collection; the rest are
//! collected as [`FailedLine`]s without aborting the import.

pub mod parsers;

use std::collections::HashMap;

use crate::catalog::CardCatalog;
use crate::models::Collection;

pub use parsers::{parse_line, ParsedLine, PARSERS};

// ---------------------------------------------------------------------------
// NameIndex
// ---------------------------------------------------------------------------

/// Exact name to oracle id lookup used by the line parsers.
pub trait NameIndex {
    fn oracle_id_by_name(&self, name: &str) -> Option<&str>;
}

impl NameIndex for CardCatalog {
    fn oracle_id_by_name(&self, name: &str) -> Option<&str> {
        self.get_by_name(name).map(|c| c.oracle_id.as_str())
    }
}

impl NameIndex for HashMap<String, String> {
    fn oracle_id_by_name(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Import results
// ---------------------------------------------------------------------------

/// A line no parser recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedLine {
    /// 1-based line number in the normalized input.
    pub line_number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub collection: Collection,
    pub failed: Vec<FailedLine>,
}

/// Parse `text` into a new collection named `name`.
pub fn import_text(name: &str, text: &str, names: &dyn NameIndex) -> ImportOutcome {
    let mut collection = Collection::new(name);
    let failed = import_into(&mut collection, text, names);
    ImportOutcome { collection, failed }
}

/// Parse `text` and merge the result into `collection`.
///
/// Entries are keyed by `(oracle id, printing id)`: a repeated key adds to
/// the existing amount, a new key is appended, so order of first appearance
/// is kept. Blank lines are skipped.
pub fn import_into(collection: &mut Collection, text: &str, names: &dyn NameIndex) -> Vec<FailedLine> {
    let normalized = text.replace("\r\n", "\n");
    let mut failed = Vec::new();
    let mut imported = 0usize;

    for (i, raw) in normalized.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line, names) {
            Some((parser, parsed)) => {
                log::trace!("Line {} parsed by {}", i + 1, parser);
                collection.merge(&parsed.oracle_id, &parsed.printing_id, parsed.amount);
                imported += 1;
            }
            None => {
                log::debug!("Line {} not recognized: {}", i + 1, line);
                failed.push(FailedLine {
                    line_number: i + 1,
                    text: line.to_string(),
                });
            }
        }
    }

    log::info!(
        "Imported {} lines into '{}', {} failed",
        imported,
        collection.name,
        failed.len()
    );
    failed
}
