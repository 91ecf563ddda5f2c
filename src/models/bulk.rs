use serde::{Deserialize, Serialize};

use crate::error::Result;

// ---------------------------------------------------------------------------
// BulkDataIndex — The bulk-data listing of the card data provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkDataIndex {
    #[serde(default)]
    pub data: Vec<BulkDataEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDataEntry {
    #[serde(rename = "type", default)]
    pub type_field: String,
    #[serde(default)]
    pub download_uri: String,
    #[serde(default)]
    pub size: u64,
}

impl BulkDataIndex {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// First listing entry of the given type (e.g. `"default_cards"`).
    pub fn entry(&self, bulk_type: &str) -> Option<&BulkDataEntry> {
        self.data.iter().find(|e| e.type_field == bulk_type)
    }
}
