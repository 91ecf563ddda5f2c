use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EntryId
// ---------------------------------------------------------------------------

/// In-memory handle of one entry within its collection.
///
/// Handles are assigned by the owning [`Collection`] and are not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

// ---------------------------------------------------------------------------
// CollectionEntry
// ---------------------------------------------------------------------------

/// One owned card line: oracle id, pinned printing and amount.
///
/// Holds plain identifiers into the catalog, never the catalog objects.
/// An empty `printing_id` means the card's default printing.
#[derive(Debug, Clone)]
pub struct CollectionEntry {
    id: EntryId,
    pub oracle_id: String,
    pub printing_id: String,
    pub amount: u32,
}

impl CollectionEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Whether the entry is pinned to a specific printing.
    pub fn is_pinned(&self) -> bool {
        !self.printing_id.is_empty()
    }
}

impl PartialEq for CollectionEntry {
    fn eq(&self, other: &Self) -> bool {
        self.oracle_id == other.oracle_id
            && self.printing_id == other.printing_id
            && self.amount == other.amount
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// A named, ordered list of owned cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CollectionFile", into = "CollectionFile")]
pub struct Collection {
    pub name: String,
    entries: Vec<CollectionEntry>,
    next_id: u64,
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.entries == other.entries
    }
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: EntryId) -> Option<&CollectionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Sum of all entry amounts.
    pub fn card_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.amount)).sum()
    }

    /// Append a new entry and return its handle.
    pub fn push(
        &mut self,
        oracle_id: impl Into<String>,
        printing_id: impl Into<String>,
        amount: u32,
    ) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(CollectionEntry {
            id,
            oracle_id: oracle_id.into(),
            printing_id: printing_id.into(),
            amount,
        });
        id
    }

    /// Add `amount` copies of a card.
    ///
    /// Increments the first entry for `oracle_id` regardless of its pinned
    /// printing; otherwise appends an unpinned entry.
    pub fn add_or_increment(&mut self, oracle_id: &str, amount: u32) -> EntryId {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.oracle_id == oracle_id) {
            entry.amount = entry.amount.saturating_add(amount);
            return entry.id;
        }
        self.push(oracle_id, "", amount)
    }

    /// Merge a parsed entry keyed by `(oracle_id, printing_id)`.
    ///
    /// Used by import: an existing entry with the same key has its amount
    /// increased, otherwise a new entry is appended.
    pub fn merge(&mut self, oracle_id: &str, printing_id: &str, amount: u32) -> EntryId {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.oracle_id == oracle_id && e.printing_id == printing_id)
        {
            entry.amount = entry.amount.saturating_add(amount);
            return entry.id;
        }
        self.push(oracle_id, printing_id, amount)
    }

    /// Remove an entry. Unknown handles are ignored.
    pub fn remove_entry(&mut self, id: EntryId) -> Option<CollectionEntry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Pin an entry to a printing; an empty id unpins it. Amount is untouched.
    ///
    /// Returns `false` when the handle is unknown.
    pub fn set_printing(&mut self, id: EntryId, printing_id: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.printing_id = printing_id.into();
                true
            }
            None => false,
        }
    }

    /// Returns `false` when the handle is unknown.
    pub fn set_amount(&mut self, id: EntryId, amount: u32) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Serialize to the collection file format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// ---------------------------------------------------------------------------
// On-disk form
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct CollectionFile {
    name: String,
    #[serde(default)]
    cards: Vec<EntryFile>,
}

#[derive(Serialize, Deserialize)]
struct EntryFile {
    oracle_id: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    amount: u32,
}

impl From<CollectionFile> for Collection {
    fn from(file: CollectionFile) -> Self {
        let mut collection = Collection::new(file.name);
        for card in file.cards {
            collection.push(card.oracle_id, card.id, card.amount);
        }
        collection
    }
}

impl From<Collection> for CollectionFile {
    fn from(collection: Collection) -> Self {
        CollectionFile {
            name: collection.name,
            cards: collection
                .entries
                .into_iter()
                .map(|e| EntryFile {
                    oracle_id: e.oracle_id,
                    id: e.printing_id,
                    amount: e.amount,
                })
                .collect(),
        }
    }
}
