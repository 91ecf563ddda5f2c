use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LogicalCard — One manifest entry (a card independent of printing)
// ---------------------------------------------------------------------------

/// A card by oracle identity, as stored in the catalog manifest.
///
/// `path` points at the card's variation file, relative to the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalCard {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub type_line: String,
    pub oracle_id: String,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub layout: String,
    #[serde(default)]
    pub oracle_text: String,
}

impl LogicalCard {
    /// Whether the card may lead a commander deck.
    pub fn can_be_commander(&self) -> bool {
        let legendary_creature =
            self.type_line.contains("Legendary") && self.type_line.contains("Creature");
        legendary_creature || self.oracle_text.contains("can be your commander")
    }

    /// Lowercase, hyphenated form of the name used in card-site URLs.
    ///
    /// `"Atraxa, Praetors' Voice"` becomes `"atraxa-praetors-voice"`. Only the
    /// front face of a `//` name is kept.
    pub fn url_slug(&self) -> String {
        let front = self.name.split(" // ").next().unwrap_or(&self.name);
        let mut slug = String::with_capacity(front.len());
        for c in front.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if (c.is_whitespace() || c == '-') && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        slug.trim_matches('-').to_string()
    }
}
