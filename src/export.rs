//! Text renderings of a collection.

use crate::catalog::CardCatalog;
use crate::error::Result;
use crate::models::{Collection, CollectionEntry};

/// A way of rendering a collection as text.
pub trait ExportProfile {
    /// Short identifier used to pick the profile (e.g. `"text"`).
    fn name(&self) -> &'static str;

    fn export(&self, collection: &Collection, catalog: &CardCatalog) -> Result<String>;
}

/// Look up a built-in profile by name.
pub fn profile(name: &str) -> Option<Box<dyn ExportProfile>> {
    match name {
        "text" => Some(Box::new(TextExport)),
        "arena" => Some(Box::new(ArenaExport)),
        _ => None,
    }
}

/// Card name for an entry, or its oracle id when the card is unknown.
fn display_name<'a>(entry: &'a CollectionEntry, catalog: &'a CardCatalog) -> &'a str {
    catalog
        .get(&entry.oracle_id)
        .map(|c| c.name.as_str())
        .unwrap_or(&entry.oracle_id)
}

// ---------------------------------------------------------------------------
// TextExport
// ---------------------------------------------------------------------------

/// `<amount> <name>` per owned entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExport;

impl ExportProfile for TextExport {
    fn name(&self) -> &'static str {
        "text"
    }

    fn export(&self, collection: &Collection, catalog: &CardCatalog) -> Result<String> {
        let lines: Vec<String> = collection
            .entries()
            .iter()
            .filter(|e| e.amount > 0)
            .map(|e| format!("{} {}", e.amount, display_name(e, catalog)))
            .collect();
        Ok(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// ArenaExport
// ---------------------------------------------------------------------------

/// `<amount> <name> (<SET>) <number>` per owned entry, using the resolved
/// printing. Unknown cards fall back to the plain `<amount> <name>` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArenaExport;

impl ExportProfile for ArenaExport {
    fn name(&self) -> &'static str {
        "arena"
    }

    fn export(&self, collection: &Collection, catalog: &CardCatalog) -> Result<String> {
        let mut lines = Vec::new();
        for entry in collection.entries().iter().filter(|e| e.amount > 0) {
            let name = display_name(entry, catalog);
            if catalog.get(&entry.oracle_id).is_none() {
                lines.push(format!("{} {}", entry.amount, name));
                continue;
            }
            let printing = catalog.resolve_or_default(entry)?;
            lines.push(format!(
                "{} {} ({}) {}",
                entry.amount,
                name,
                printing.set.to_uppercase(),
                printing.collector_number
            ));
        }
        Ok(lines.join("\n"))
    }
}
