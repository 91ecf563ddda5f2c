//! Card lookups and filters over the catalog manifest.

use std::sync::Arc;

use crate::catalog::CardCatalog;
use crate::error::Result;
use crate::models::{LogicalCard, Printing};

// ---------------------------------------------------------------------------
// CardQuery
// ---------------------------------------------------------------------------

/// Query interface for catalog cards.
pub struct CardQuery<'a> {
    catalog: &'a CardCatalog,
}

impl<'a> CardQuery<'a> {
    /// Create a new `CardQuery` bound to the given catalog.
    pub fn new(catalog: &'a CardCatalog) -> Self {
        Self { catalog }
    }

    pub fn get(&self, oracle_id: &str) -> Option<&'a LogicalCard> {
        self.catalog.get(oracle_id)
    }

    /// Exact, case-sensitive name lookup.
    pub fn get_by_name(&self, name: &str) -> Option<&'a LogicalCard> {
        self.catalog.get_by_name(name)
    }

    /// Cards whose name contains `filter`, ignoring case, in catalog order.
    ///
    /// An empty filter returns every card.
    pub fn filter_by_name(&self, filter: &str) -> Vec<&'a LogicalCard> {
        let needle = filter.to_lowercase();
        self.catalog
            .cards()
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Cards with the given layout tag (e.g. `"scheme"`, `"transform"`).
    pub fn by_layout(&self, layout: &str) -> Vec<&'a LogicalCard> {
        self.catalog
            .cards()
            .iter()
            .filter(|c| c.layout == layout)
            .collect()
    }

    /// Cards that may lead a commander deck.
    pub fn commanders(&self) -> Vec<&'a LogicalCard> {
        self.catalog
            .cards()
            .iter()
            .filter(|c| c.can_be_commander())
            .collect()
    }

    /// All printings of a card, in catalog order.
    pub fn printings(&self, oracle_id: &str) -> Result<Arc<Vec<Printing>>> {
        self.catalog.variations(oracle_id)
    }

    /// A printing of a card by its display identity (see [`Printing::uid`]).
    pub fn printing_by_uid(&self, oracle_id: &str, uid: &str) -> Result<Option<Printing>> {
        let printings = self.catalog.variations(oracle_id)?;
        Ok(printings.iter().find(|p| p.uid() == uid).cloned())
    }
}
