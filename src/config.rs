use std::collections::HashMap;
use std::path::PathBuf;

use crate::models::{PriceThreshold, PriceThresholdTable, PriceTables};

/// Bulk listing entry that carries every printing (not one per oracle card).
pub const DEFAULT_BULK_TYPE: &str = "default_cards";

pub const CATALOG_DIR: &str = "catalog";
pub const MANIFEST_FILE: &str = "cards.json";
pub const VARIATIONS_DIR: &str = "variations";
pub const COLLECTIONS_DIR: &str = "Collections";
pub const PRICE_CONFIG_FILE: &str = "prices.json";

pub const DEFAULT_PRICE_FIELD: &str = "usd";
pub const WILDCARD_PRICE_FIELD: &str = "*";
/// Online-ticket prices are not money and never take part in cheapest-printing search.
pub const EXCLUDED_PRICE_FIELD: &str = "tix";
pub const DEFAULT_IMAGE_VARIANT: &str = "normal";

fn table(rows: &[(f64, &str)]) -> PriceThresholdTable {
    PriceThresholdTable::new(
        rows.iter()
            .map(|(min, color)| PriceThreshold {
                min: *min,
                color: color.to_string(),
            })
            .collect(),
    )
}

pub fn default_price_tables() -> PriceTables {
    PriceTables::new(HashMap::from([
        (
            WILDCARD_PRICE_FIELD.to_string(),
            table(&[(10.0, "red"), (5.0, "orange"), (1.0, "yellow"), (0.0, "green")]),
        ),
        (
            EXCLUDED_PRICE_FIELD.to_string(),
            table(&[(5.0, "red"), (1.0, "orange"), (0.0, "green")]),
        ),
    ]))
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("mtg-collections")
    } else {
        PathBuf::from(".mtg-collections")
    }
}
