//! Magic: The Gathering collection manager core.
//!
//! Builds a printing-aware card catalog from a bulk card download, keeps
//! named collections of owned cards, imports deck lists from free text and
//! values collections from the printings' price fields.
//!
//! # Quick start
//!
//! ```no_run
//! use mtg_collections::Library;
//!
//! let mut library = Library::builder().data_dir("./mtg-data").build().unwrap();
//!
//! // Build the catalog from a downloaded bulk file
//! let bytes = std::fs::read("default-cards.json").unwrap();
//! library.ingest_bulk(&bytes).unwrap();
//!
//! // Import a deck list and value it
//! let failed = library.import_collection("Burn", "4 Lightning Bolt\n20 Mountain").unwrap();
//! let burn = library.collections().get("Burn").unwrap();
//! let total = library.prices().collection_total(burn).unwrap();
//! library.save_collections().unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_library;
pub mod catalog;
pub mod collections;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod pricing;
pub mod queries;
pub mod store;

#[cfg(feature = "async")]
pub use async_library::AsyncLibrary;
pub use catalog::{CardCatalog, IngestReport};
pub use collections::CollectionSet;
pub use error::{CollectionsError, Result};
pub use export::{ArenaExport, ExportProfile, TextExport};
pub use import::{FailedLine, ImportOutcome, NameIndex};
pub use pricing::PricingEngine;

use std::fmt;
use std::path::{Path, PathBuf};

use models::PriceTables;

// ---------------------------------------------------------------------------
// LibraryBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Library`].
///
/// Use [`Library::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](LibraryBuilder::build).
pub struct LibraryBuilder {
    data_dir: Option<PathBuf>,
    price_field: String,
    price_tables: Option<PriceTables>,
}

impl Default for LibraryBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            price_field: config::DEFAULT_PRICE_FIELD.to_string(),
            price_tables: None,
        }
    }
}

impl LibraryBuilder {
    /// Set the data directory holding the catalog and the collections.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/mtg-collections` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the price field used for valuation. Defaults to `usd`.
    pub fn price_field(mut self, field: impl Into<String>) -> Self {
        self.price_field = field.into();
        self
    }

    /// Set the color threshold tables.
    ///
    /// If not set, `prices.json` in the data directory is read when present,
    /// otherwise [`config::default_price_tables`] is used.
    pub fn price_tables(mut self, tables: PriceTables) -> Self {
        self.price_tables = Some(tables);
        self
    }

    /// Build the library, loading the catalog and collections found on disk.
    ///
    /// A data directory without a catalog yields an empty catalog.
    pub fn build(self) -> Result<Library> {
        let data_dir = self.data_dir.unwrap_or_else(config::default_data_dir);
        std::fs::create_dir_all(&data_dir)?;

        let tables = match self.price_tables {
            Some(tables) => tables,
            None => {
                let path = data_dir.join(config::PRICE_CONFIG_FILE);
                if path.exists() {
                    PriceTables::from_json_file(&path)?
                } else {
                    config::default_price_tables()
                }
            }
        };

        let mut library = Library {
            catalog: CardCatalog::empty(data_dir.join(config::CATALOG_DIR)),
            collections: CollectionSet::new(),
            engine: PricingEngine::new(tables),
            price_field: self.price_field,
            data_dir,
        };
        if library.manifest_path().exists() {
            library.load_catalog()?;
        }
        library.load_collections()?;
        Ok(library)
    }
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// The main entry point: a catalog, the user's collections and a pricing
/// engine rooted in one data directory.
///
/// Created via [`Library::builder()`].
pub struct Library {
    data_dir: PathBuf,
    catalog: CardCatalog,
    collections: CollectionSet,
    engine: PricingEngine,
    price_field: String,
}

impl Library {
    /// Create a new builder for configuring the library.
    pub fn builder() -> LibraryBuilder {
        LibraryBuilder::default()
    }

    // -- Paths -------------------------------------------------------------

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn catalog_dir(&self) -> PathBuf {
        self.data_dir.join(config::CATALOG_DIR)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.catalog_dir().join(config::MANIFEST_FILE)
    }

    pub fn collections_dir(&self) -> PathBuf {
        self.data_dir.join(config::COLLECTIONS_DIR)
    }

    // -- Catalog -----------------------------------------------------------

    /// Replace the catalog with one built from a bulk download and reload it.
    pub fn ingest_bulk(&mut self, bytes: &[u8]) -> Result<IngestReport> {
        let report = CardCatalog::ingest_bytes(bytes, &self.catalog_dir())?;
        self.load_catalog()?;
        Ok(report)
    }

    /// Reload the catalog from its manifest, dropping cached printings.
    pub fn load_catalog(&mut self) -> Result<()> {
        self.catalog = CardCatalog::load(&self.manifest_path())?;
        Ok(())
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    // -- Collections -------------------------------------------------------

    /// Reload all collections from disk, discarding unsaved changes.
    pub fn load_collections(&mut self) -> Result<()> {
        self.collections = CollectionSet::load_dir(&self.collections_dir())?;
        Ok(())
    }

    /// Write every collection to disk.
    pub fn save_collections(&mut self) -> Result<()> {
        let dir = self.collections_dir();
        self.collections.save_all(&dir)
    }

    pub fn collections(&self) -> &CollectionSet {
        &self.collections
    }

    pub fn collections_mut(&mut self) -> &mut CollectionSet {
        &mut self.collections
    }

    /// Import deck-list text into the named collection, creating it if it
    /// does not exist. Returns the lines no parser recognized.
    pub fn import_collection(&mut self, name: &str, text: &str) -> Result<Vec<FailedLine>> {
        if self.collections.get(name).is_none() {
            self.collections.create(name)?;
        }
        let collection = self
            .collections
            .get_mut(name)
            .ok_or_else(|| CollectionsError::NotFound(format!("Collection '{}'", name)))?;
        Ok(import::import_into(collection, text, &self.catalog))
    }

    /// Render a collection with a built-in export profile (`text`, `arena`).
    pub fn export(&self, collection: &str, profile: &str) -> Result<String> {
        let collection = self
            .collections
            .get(collection)
            .ok_or_else(|| CollectionsError::NotFound(format!("Collection '{}'", collection)))?;
        let profile = export::profile(profile).ok_or_else(|| {
            CollectionsError::NotFound(format!("Export profile '{}'", profile))
        })?;
        profile.export(collection, &self.catalog)
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the card query interface.
    pub fn cards(&self) -> queries::CardQuery<'_> {
        queries::CardQuery::new(&self.catalog)
    }

    /// Access the valuation interface under the configured price field.
    pub fn prices(&self) -> queries::PriceQuery<'_> {
        queries::PriceQuery::new(&self.catalog, &self.engine, &self.price_field)
    }

    /// Access the scheme card interface.
    pub fn schemes(&self) -> queries::SchemeQuery<'_> {
        queries::SchemeQuery::new(&self.catalog)
    }

    pub fn pricing(&self) -> &PricingEngine {
        &self.engine
    }

    pub fn price_field(&self) -> &str {
        &self.price_field
    }

    pub fn set_price_field(&mut self, field: impl Into<String>) {
        self.price_field = field.into();
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Library(data_dir={}, cards={}, collections=[{}], price_field={})",
            self.data_dir.display(),
            self.catalog.len(),
            self.collections.names().join(", "),
            self.price_field
        )
    }
}
