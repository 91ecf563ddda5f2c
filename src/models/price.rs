use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::WILDCARD_PRICE_FIELD;
use crate::error::{CollectionsError, Result};
use crate::store;

// ---------------------------------------------------------------------------
// PriceThreshold / PriceThresholdTable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceThreshold {
    pub min: f64,
    pub color: String,
}

/// Color thresholds for one price field, kept in descending `min` order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<PriceThreshold>", into = "Vec<PriceThreshold>")]
pub struct PriceThresholdTable {
    thresholds: Vec<PriceThreshold>,
}

impl PriceThresholdTable {
    pub fn new(mut thresholds: Vec<PriceThreshold>) -> Self {
        thresholds.sort_by(|a, b| b.min.total_cmp(&a.min));
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &[PriceThreshold] {
        &self.thresholds
    }

    /// Tag of the highest threshold whose minimum is at or below `price`.
    pub fn color_of(&self, price: f64) -> Option<&str> {
        self.thresholds
            .iter()
            .find(|t| t.min <= price)
            .map(|t| t.color.as_str())
    }
}

impl From<Vec<PriceThreshold>> for PriceThresholdTable {
    fn from(thresholds: Vec<PriceThreshold>) -> Self {
        Self::new(thresholds)
    }
}

impl From<PriceThresholdTable> for Vec<PriceThreshold> {
    fn from(table: PriceThresholdTable) -> Self {
        table.thresholds
    }
}

// ---------------------------------------------------------------------------
// PriceTables — Per-field tables plus the `*` fallback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTables {
    tables: HashMap<String, PriceThresholdTable>,
}

impl PriceTables {
    pub fn new(tables: HashMap<String, PriceThresholdTable>) -> Self {
        Self { tables }
    }

    /// Read tables from a JSON object of `{field: [{min, color}, ...]}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let tables: Self = store::read_json(path)?;
        for (field, table) in &tables.tables {
            if table.thresholds.iter().any(|t| !t.min.is_finite()) {
                return Err(CollectionsError::Parse(format!(
                    "Non-finite threshold in price table '{}'",
                    field
                )));
            }
        }
        Ok(tables)
    }

    pub fn insert(&mut self, field: impl Into<String>, table: PriceThresholdTable) {
        self.tables.insert(field.into(), table);
    }

    /// The table for `field`, or the wildcard table when the field has none.
    pub fn table_for(&self, field: &str) -> Option<&PriceThresholdTable> {
        self.tables
            .get(field)
            .or_else(|| self.tables.get(WILDCARD_PRICE_FIELD))
    }
}

// ---------------------------------------------------------------------------
// PriceDisplay — Value ready for presentation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDisplay {
    pub value: f64,
    pub text: String,
    pub color: Option<String>,
}
