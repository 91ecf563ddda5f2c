//! Valuation queries binding the pricing engine to a catalog and a price field.

use crate::catalog::CardCatalog;
use crate::error::Result;
use crate::models::{Collection, CollectionEntry, PriceDisplay, Printing};
use crate::pricing::PricingEngine;

// ---------------------------------------------------------------------------
// PriceQuery
// ---------------------------------------------------------------------------

/// Query interface for collection values under one price field.
pub struct PriceQuery<'a> {
    catalog: &'a CardCatalog,
    engine: &'a PricingEngine,
    field: &'a str,
}

impl<'a> PriceQuery<'a> {
    /// Create a new `PriceQuery` valuing with `field`.
    pub fn new(catalog: &'a CardCatalog, engine: &'a PricingEngine, field: &'a str) -> Self {
        Self {
            catalog,
            engine,
            field,
        }
    }

    /// The same query under another price field.
    pub fn with_field(&self, field: &'a str) -> Self {
        Self::new(self.catalog, self.engine, field)
    }

    pub fn field(&self) -> &str {
        self.field
    }

    pub fn unit_price(&self, printing: &Printing) -> Option<f64> {
        self.engine.unit_price(printing, self.field)
    }

    pub fn line_total(&self, entry: &CollectionEntry) -> Result<f64> {
        self.engine.line_total(entry, self.catalog, self.field)
    }

    pub fn collection_total(&self, collection: &Collection) -> Result<f64> {
        self.engine
            .collection_total(collection, self.catalog, self.field)
    }

    /// Line total of an entry, formatted and colored.
    pub fn entry_display(&self, entry: &CollectionEntry) -> Result<PriceDisplay> {
        let total = self.line_total(entry)?;
        Ok(self.engine.display(total, self.field))
    }

    /// Collection total, formatted and colored.
    pub fn collection_display(&self, collection: &Collection) -> Result<PriceDisplay> {
        let total = self.collection_total(collection)?;
        Ok(self.engine.display(total, self.field))
    }

    /// Cheapest printing of a card over fields containing this query's field
    /// name, so `usd` also considers `usd_foil` and `usd_etched`.
    pub fn cheapest_printing(&self, oracle_id: &str) -> Result<Option<Printing>> {
        self.engine
            .cheapest_printing(self.catalog, oracle_id, self.field)
    }
}
