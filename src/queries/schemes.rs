//! Archenemy scheme cards: browsing by set and shuffling a scheme deck.

use std::collections::BTreeMap;

use rand::prelude::*;

use crate::catalog::CardCatalog;
use crate::error::{CollectionsError, Result};
use crate::models::{LogicalCard, Printing};

pub const SCHEME_LAYOUT: &str = "scheme";

// ---------------------------------------------------------------------------
// SchemeQuery
// ---------------------------------------------------------------------------

/// Query interface for scheme cards.
pub struct SchemeQuery<'a> {
    catalog: &'a CardCatalog,
}

impl<'a> SchemeQuery<'a> {
    /// Create a new `SchemeQuery` bound to the given catalog.
    pub fn new(catalog: &'a CardCatalog) -> Self {
        Self { catalog }
    }

    /// Scheme cards grouped by the set name of their default printing.
    pub fn by_set(&self) -> Result<BTreeMap<String, Vec<&'a LogicalCard>>> {
        let mut sets: BTreeMap<String, Vec<&'a LogicalCard>> = BTreeMap::new();
        for card in self
            .catalog
            .cards()
            .iter()
            .filter(|c| c.layout == SCHEME_LAYOUT)
        {
            let printing = self.catalog.default_printing(&card.oracle_id)?;
            sets.entry(printing.set_name).or_default().push(card);
        }
        Ok(sets)
    }

    /// Default printings of the selected schemes in random order.
    pub fn shuffled_deck<R: Rng + ?Sized>(
        &self,
        oracle_ids: &[&str],
        rng: &mut R,
    ) -> Result<Vec<Printing>> {
        let mut deck = Vec::with_capacity(oracle_ids.len());
        for oracle_id in oracle_ids {
            let card = self.catalog.get(oracle_id).ok_or_else(|| {
                CollectionsError::NotFound(format!("Unknown card: {}", oracle_id))
            })?;
            if card.layout != SCHEME_LAYOUT {
                return Err(CollectionsError::InvalidArgument(format!(
                    "'{}' is not a scheme card",
                    card.name
                )));
            }
            deck.push(self.catalog.default_printing(oracle_id)?);
        }
        deck.shuffle(rng);
        Ok(deck)
    }
}
