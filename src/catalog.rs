//! Printing-aware card catalog.
//!
//! A bulk download is a flat list of printings. [`CardCatalog::ingest`] groups
//! it by oracle id and writes one variation file per card plus a manifest of
//! card summaries. [`CardCatalog::load`] reads the manifest back and builds the
//! in-memory indexes; variation files are only read when a card's printings
//! are first requested, then kept for the life of the catalog.

use crate::config;
use crate::error::{CollectionsError, Result};
use crate::models::{CollectionEntry, LogicalCard, Printing, RawPrinting};
use crate::store;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// IngestReport
// ---------------------------------------------------------------------------

/// Batch summary of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Logical cards written to the manifest.
    pub cards: usize,
    /// Printings written across all variation files.
    pub printings: usize,
    /// Records skipped because they had no oracle id.
    pub dropped_without_oracle_id: usize,
    /// Records skipped because they could not be decoded.
    pub malformed: usize,
}

// ---------------------------------------------------------------------------
// CatalogIndex
// ---------------------------------------------------------------------------

/// Oracle-id and name lookups over the manifest. Rebuilt on every load.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    cards: Vec<LogicalCard>,
    by_oracle: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    name_collisions: usize,
}

impl CatalogIndex {
    /// Index `cards` in order.
    ///
    /// Duplicate oracle ids keep the first card. A name shared by two cards
    /// resolves to the first one seen; the later card stays reachable by
    /// oracle id only.
    pub fn build(cards: Vec<LogicalCard>) -> Self {
        let mut index = CatalogIndex::default();
        for card in cards {
            if index.by_oracle.contains_key(&card.oracle_id) {
                log::warn!("Duplicate oracle id {} in manifest, skipping", card.oracle_id);
                continue;
            }
            let pos = index.cards.len();
            index.by_oracle.insert(card.oracle_id.clone(), pos);
            if index.by_name.contains_key(&card.name) {
                log::debug!(
                    "Name collision on '{}': {} is unreachable by name",
                    card.name,
                    card.oracle_id
                );
                index.name_collisions += 1;
            } else {
                index.by_name.insert(card.name.clone(), pos);
            }
            index.cards.push(card);
        }
        index
    }

    pub fn get(&self, oracle_id: &str) -> Option<&LogicalCard> {
        self.by_oracle.get(oracle_id).map(|&i| &self.cards[i])
    }

    /// Exact, case-sensitive name lookup.
    pub fn get_by_name(&self, name: &str) -> Option<&LogicalCard> {
        self.by_name.get(name).map(|&i| &self.cards[i])
    }

    pub fn cards(&self) -> &[LogicalCard] {
        &self.cards
    }

    pub fn name_collisions(&self) -> usize {
        self.name_collisions
    }
}

// ---------------------------------------------------------------------------
// CardCatalog
// ---------------------------------------------------------------------------

/// The loaded catalog: manifest index plus a lazily filled printing cache.
///
/// The printing cache uses interior mutability, so a catalog is meant to be
/// owned by one thread at a time.
#[derive(Debug)]
pub struct CardCatalog {
    root: PathBuf,
    index: CatalogIndex,
    variations: RefCell<HashMap<String, Arc<Vec<Printing>>>>,
}

impl CardCatalog {
    /// An empty catalog rooted at `root`; every lookup misses.
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index: CatalogIndex::default(),
            variations: RefCell::new(HashMap::new()),
        }
    }

    /// Group raw printings by oracle id and write the catalog to `out_dir`.
    ///
    /// The first printing of each group supplies the card's name, type line,
    /// text, color identity and layout; the whole group, in input order,
    /// becomes its printing list. Records with a missing or empty oracle id
    /// are dropped.
    ///
    /// Everything previously in `out_dir` is replaced. The new catalog is
    /// built in a staging directory and swapped in at the end, so a failed
    /// run leaves the old catalog intact.
    pub fn ingest<I>(raw: I, out_dir: &Path) -> Result<(Vec<LogicalCard>, IngestReport)>
    where
        I: IntoIterator<Item = RawPrinting>,
    {
        let mut report = IngestReport::default();
        let mut groups: IndexMap<String, (LogicalCard, Vec<Printing>)> = IndexMap::new();

        for record in raw {
            let oracle_id = match record.oracle_id.as_deref() {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => {
                    report.dropped_without_oracle_id += 1;
                    continue;
                }
            };
            let RawPrinting {
                name,
                type_line,
                oracle_text,
                color_identity,
                printing,
                ..
            } = record;

            let (_, printings) = groups.entry(oracle_id.clone()).or_insert_with(|| {
                let card = LogicalCard {
                    name,
                    path: variation_path(&oracle_id),
                    type_line,
                    oracle_id,
                    color_identity,
                    layout: printing.layout.clone(),
                    oracle_text,
                };
                (card, Vec::new())
            });
            printings.push(printing);
        }

        let staging = store::staging_dir(out_dir)?;
        fs::create_dir_all(staging.path().join(config::VARIATIONS_DIR))?;

        let mut manifest = Vec::with_capacity(groups.len());
        for (_, (card, printings)) in groups {
            let mut uids = HashSet::with_capacity(printings.len());
            for p in &printings {
                if !uids.insert(p.uid()) {
                    log::warn!("Duplicate printing {} of card {}", p.uid(), card.oracle_id);
                }
            }
            let json = serde_json::to_vec(&printings)?;
            fs::write(staging.path().join(&card.path), json)?;
            report.printings += printings.len();
            manifest.push(card);
        }
        report.cards = manifest.len();

        fs::write(
            staging.path().join(config::MANIFEST_FILE),
            serde_json::to_vec(&manifest)?,
        )?;
        store::replace_dir(staging, out_dir)?;

        log::info!(
            "Ingested {} cards ({} printings) into {}; dropped {} without oracle id",
            report.cards,
            report.printings,
            out_dir.display(),
            report.dropped_without_oracle_id
        );
        Ok((manifest, report))
    }

    /// Ingest a raw bulk download (a JSON array, optionally gzipped).
    ///
    /// Array elements that do not decode as printings are counted in
    /// [`IngestReport::malformed`] and skipped. A payload that is not a JSON
    /// array fails the whole run.
    pub fn ingest_bytes(bytes: &[u8], out_dir: &Path) -> Result<IngestReport> {
        let payload = store::decode_bulk(bytes)?;
        let value: serde_json::Value = serde_json::from_slice(&payload)?;
        let items = match value {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(CollectionsError::Parse(format!(
                    "Bulk card data must be a JSON array, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut malformed = 0;
        let raw: Vec<RawPrinting> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<RawPrinting>(item) {
                Ok(r) => Some(r),
                Err(e) => {
                    log::debug!("Skipping malformed bulk record: {}", e);
                    malformed += 1;
                    None
                }
            })
            .collect();

        let (_, mut report) = Self::ingest(raw, out_dir)?;
        report.malformed = malformed;
        if malformed > 0 {
            log::warn!("Skipped {} malformed bulk records", malformed);
        }
        Ok(report)
    }

    /// Load a catalog from its manifest file.
    ///
    /// Printing lists are not read here; see [`variations`](Self::variations).
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let cards: Vec<LogicalCard> = store::read_json(manifest_path)?;
        let root = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let index = CatalogIndex::build(cards);
        log::info!(
            "Loaded {} cards from {} ({} name collisions)",
            index.cards.len(),
            manifest_path.display(),
            index.name_collisions
        );
        Ok(Self {
            root,
            index,
            variations: RefCell::new(HashMap::new()),
        })
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn get(&self, oracle_id: &str) -> Option<&LogicalCard> {
        self.index.get(oracle_id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&LogicalCard> {
        self.index.get_by_name(name)
    }

    pub fn cards(&self) -> &[LogicalCard] {
        self.index.cards()
    }

    pub fn len(&self) -> usize {
        self.index.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.cards.is_empty()
    }

    /// The ordered printing list of a card, read from disk on first access.
    pub fn variations(&self, oracle_id: &str) -> Result<Arc<Vec<Printing>>> {
        if let Some(cached) = self.variations.borrow().get(oracle_id) {
            return Ok(Arc::clone(cached));
        }

        let card = self
            .get(oracle_id)
            .ok_or_else(|| CollectionsError::NotFound(format!("Unknown card: {}", oracle_id)))?;
        let printings: Vec<Printing> = store::read_json(&self.root.join(&card.path))?;
        if printings.is_empty() {
            return Err(CollectionsError::Parse(format!(
                "Variation file {} has no printings",
                card.path
            )));
        }

        let printings = Arc::new(printings);
        self.variations
            .borrow_mut()
            .insert(oracle_id.to_string(), Arc::clone(&printings));
        Ok(printings)
    }

    /// Drop every cached printing list.
    pub fn invalidate_variations(&self) {
        self.variations.borrow_mut().clear();
    }

    /// The first printing of a card.
    pub fn default_printing(&self, oracle_id: &str) -> Result<Printing> {
        let printings = self.variations(oracle_id)?;
        printings.first().cloned().ok_or_else(|| {
            CollectionsError::Parse(format!("Card {} has no printings", oracle_id))
        })
    }

    /// The printing an entry refers to.
    ///
    /// Unpinned entries resolve to the default printing. A pin that matches
    /// none of the card's printings yields
    /// [`CollectionsError::PrintingNotFound`].
    pub fn resolve_printing(&self, entry: &CollectionEntry) -> Result<Printing> {
        let printings = self.variations(&entry.oracle_id)?;
        if !entry.is_pinned() {
            return self.default_printing(&entry.oracle_id);
        }
        printings
            .iter()
            .find(|p| p.id == entry.printing_id)
            .cloned()
            .ok_or_else(|| CollectionsError::PrintingNotFound {
                oracle_id: entry.oracle_id.clone(),
                printing_id: entry.printing_id.clone(),
            })
    }

    /// Like [`resolve_printing`](Self::resolve_printing) but falls back to
    /// the default printing when the pin is stale.
    pub fn resolve_or_default(&self, entry: &CollectionEntry) -> Result<Printing> {
        match self.resolve_printing(entry) {
            Err(CollectionsError::PrintingNotFound {
                oracle_id,
                printing_id,
            }) => {
                log::warn!(
                    "Printing {} not found for {}, using default printing",
                    printing_id,
                    oracle_id
                );
                self.default_printing(&oracle_id)
            }
            other => other,
        }
    }
}

/// Relative path of a card's variation file inside the catalog directory.
///
/// Lowercase ASCII letters, digits and `-` are kept; every other byte is
/// written as `%XX`. The mapping is one-to-one even on case-insensitive
/// filesystems, and leaves the usual lowercase UUID oracle ids unchanged.
fn variation_path(oracle_id: &str) -> String {
    let mut file = String::with_capacity(oracle_id.len());
    for b in oracle_id.bytes() {
        match b {
            b'a'..=b'z' | b'0'..=b'9' | b'-' => file.push(char::from(b)),
            _ => file.push_str(&format!("%{:02X}", b)),
        }
    }
    format!("{}/{}.json", config::VARIATIONS_DIR, file)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
