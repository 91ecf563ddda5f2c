//! Collection valuation.
//!
//! Prices are read from the string price fields of a printing (e.g. `usd`,
//! `usd_foil`, `eur`). Missing, null and unparseable values count as absent.

use crate::catalog::CardCatalog;
use crate::config::EXCLUDED_PRICE_FIELD;
use crate::error::{CollectionsError, Result};
use crate::models::{Collection, CollectionEntry, PriceDisplay, PriceTables, Printing};

/// Round to whole cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a price field value. `None`, non-numeric and non-finite values are absent.
pub fn parse_price(value: Option<&str>) -> Option<f64> {
    let parsed: f64 = value?.trim().parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// The cheapest printing among `printings` over fields whose name contains
/// `field_substring`.
///
/// `tix` is never a candidate. Ties keep the first candidate in
/// printing-then-field order.
pub fn cheapest_of<'p>(printings: &'p [Printing], field_substring: &str) -> Option<&'p Printing> {
    let mut best: Option<(f64, &Printing)> = None;
    for printing in printings {
        for (field, value) in &printing.prices {
            if field == EXCLUDED_PRICE_FIELD || !field.contains(field_substring) {
                continue;
            }
            let Some(price) = parse_price(value.as_deref()) else {
                continue;
            };
            match best {
                Some((lowest, _)) if price >= lowest => {}
                _ => best = Some((price, printing)),
            }
        }
    }
    best.map(|(_, p)| p)
}

// ---------------------------------------------------------------------------
// PricingEngine
// ---------------------------------------------------------------------------

/// Computes entry and collection values and their display colors.
///
/// Threshold tables are configuration handed in at construction.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    tables: PriceTables,
}

impl PricingEngine {
    pub fn new(tables: PriceTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &PriceTables {
        &self.tables
    }

    pub fn unit_price(&self, printing: &Printing, field: &str) -> Option<f64> {
        parse_price(printing.prices.get(field)?.as_deref())
    }

    /// Unit price of the entry's printing times its amount, rounded to cents.
    ///
    /// Entries without a price, or whose card is not in the catalog, are
    /// worth 0. A stale printing pin is valued at the default printing.
    pub fn line_total(
        &self,
        entry: &CollectionEntry,
        catalog: &CardCatalog,
        field: &str,
    ) -> Result<f64> {
        let printing = match catalog.resolve_or_default(entry) {
            Ok(p) => p,
            Err(CollectionsError::NotFound(msg)) => {
                log::warn!("Valuing entry at 0: {}", msg);
                return Ok(0.0);
            }
            Err(e) => return Err(e),
        };
        Ok(self
            .unit_price(&printing, field)
            .map(|unit| round_cents(unit * f64::from(entry.amount)))
            .unwrap_or(0.0))
    }

    /// Sum of all line totals; 0 for an empty collection.
    pub fn collection_total(
        &self,
        collection: &Collection,
        catalog: &CardCatalog,
        field: &str,
    ) -> Result<f64> {
        let mut total = 0.0;
        for entry in collection.entries() {
            total += self.line_total(entry, catalog, field)?;
        }
        Ok(round_cents(total))
    }

    /// Color tag for `price` under the table of `field`, falling back to the
    /// wildcard table. `None` when neither exists or no threshold applies.
    pub fn color_of(&self, price: f64, field: &str) -> Option<&str> {
        self.tables.table_for(field)?.color_of(price)
    }

    /// A value formatted to two decimals with its color.
    pub fn display(&self, value: f64, field: &str) -> PriceDisplay {
        PriceDisplay {
            value,
            text: format!("{:.2}", value),
            color: self.color_of(value, field).map(str::to_string),
        }
    }

    /// The card's cheapest printing over price fields containing
    /// `field_substring`. See [`cheapest_of`].
    pub fn cheapest_printing(
        &self,
        catalog: &CardCatalog,
        oracle_id: &str,
        field_substring: &str,
    ) -> Result<Option<Printing>> {
        let printings = catalog.variations(oracle_id)?;
        Ok(cheapest_of(&printings, field_substring).cloned())
    }
}
