//! Async wrapper around [`Library`] for use in async runtimes (Tokio, etc.).
//!
//! Runs library operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], so catalog ingestion and loading never
//! stall the caller's event loop. The library sits behind a [`Mutex`]: every
//! operation has exclusive access, and results come back through the task's
//! join handle.
//!
//! # Example
//!
//! ```no_run
//! use mtg_collections::AsyncLibrary;
//!
//! #[tokio::main]
//! async fn main() {
//!     let library = AsyncLibrary::builder().data_dir("./mtg-data").build().await.unwrap();
//!
//!     let bytes = std::fs::read("default-cards.json").unwrap();
//!     let report = library.ingest_bulk(bytes).await.unwrap();
//!
//!     let cards = library.run(|l| Ok(l.catalog().len())).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{CollectionsError, Result};
use crate::models::PriceTables;
use crate::{FailedLine, IngestReport, Library};

// ---------------------------------------------------------------------------
// AsyncLibraryBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncLibrary`] instance.
#[derive(Default)]
pub struct AsyncLibraryBuilder {
    data_dir: Option<PathBuf>,
    price_field: Option<String>,
    price_tables: Option<PriceTables>,
}

impl AsyncLibraryBuilder {
    /// Set a custom data directory.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the price field used for valuation.
    pub fn price_field(mut self, field: impl Into<String>) -> Self {
        self.price_field = Some(field.into());
        self
    }

    /// Set the color threshold tables.
    pub fn price_tables(mut self, tables: PriceTables) -> Self {
        self.price_tables = Some(tables);
        self
    }

    /// Build the async library; loading runs on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncLibrary> {
        tokio::task::spawn_blocking(move || {
            let mut builder = Library::builder();
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if let Some(field) = self.price_field {
                builder = builder.price_field(field);
            }
            if let Some(tables) = self.price_tables {
                builder = builder.price_tables(tables);
            }
            let library = builder.build()?;
            Ok(AsyncLibrary {
                inner: Arc::new(Mutex::new(library)),
            })
        })
        .await
        .map_err(|e| CollectionsError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncLibrary
// ---------------------------------------------------------------------------

/// Async wrapper around [`Library`].
///
/// All operations are dispatched to a blocking thread pool. Use
/// [`run()`](Self::run) to execute any sync library method.
#[derive(Clone)]
pub struct AsyncLibrary {
    inner: Arc<Mutex<Library>>,
}

impl AsyncLibrary {
    /// Create a new builder for configuring the async library.
    pub fn builder() -> AsyncLibraryBuilder {
        AsyncLibraryBuilder::default()
    }

    /// Run a sync library operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Library) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let library = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = library
                .lock()
                .map_err(|_| CollectionsError::InvalidArgument("Library lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| CollectionsError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Ingest a bulk download and reload the catalog.
    pub async fn ingest_bulk(&self, bytes: Vec<u8>) -> Result<IngestReport> {
        self.run(move |l| l.ingest_bulk(&bytes)).await
    }

    /// Reload the catalog from disk.
    pub async fn load_catalog(&self) -> Result<()> {
        self.run(|l| l.load_catalog()).await
    }

    /// Import deck-list text into a collection.
    pub async fn import_collection(&self, name: &str, text: &str) -> Result<Vec<FailedLine>> {
        let name = name.to_string();
        let text = text.to_string();
        self.run(move |l| l.import_collection(&name, &text)).await
    }

    /// Write every collection to disk.
    pub async fn save_collections(&self) -> Result<()> {
        self.run(|l| l.save_collections()).await
    }
}
