use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_IMAGE_VARIANT;

// ---------------------------------------------------------------------------
// CardFace — One face of a multi-faced printing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<IndexMap<String, String>>,
}

// ---------------------------------------------------------------------------
// Printing — One physical version of a card (a variation file element)
// ---------------------------------------------------------------------------

/// A single printing of a logical card.
///
/// Price and image maps keep the key order of the source document so that
/// scans over them are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Printing {
    pub id: String,
    #[serde(default)]
    pub image_uris: IndexMap<String, String>,
    #[serde(default)]
    pub prices: IndexMap<String, Option<String>>,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub collector_number: String,
    #[serde(default)]
    pub layout: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_faces: Option<Vec<CardFace>>,
}

impl Printing {
    /// Display identity of the printing, unique within one card's printing list.
    ///
    /// `"Core Set 2021 (M21#262)"`
    pub fn uid(&self) -> String {
        format!(
            "{} ({}#{})",
            self.set_name,
            self.set.to_uppercase(),
            self.collector_number
        )
    }

    /// Image URIs for the given variant (e.g. `"normal"`).
    ///
    /// Multi-faced printings that carry per-face images yield one URI per
    /// face, in face order. Everything else yields the printing's own URI.
    pub fn image_uris(&self, variant: &str) -> Vec<&str> {
        if let Some(faces) = &self.card_faces {
            let face_uris: Vec<&str> = faces
                .iter()
                .filter_map(|f| f.image_uris.as_ref())
                .filter_map(|uris| uris.get(variant))
                .map(|s| s.as_str())
                .collect();
            if !face_uris.is_empty() {
                return face_uris;
            }
        }
        self.image_uris
            .get(variant)
            .map(|s| vec![s.as_str()])
            .unwrap_or_default()
    }

    /// [`image_uris`](Self::image_uris) for the `normal` variant.
    pub fn default_image_uris(&self) -> Vec<&str> {
        self.image_uris(DEFAULT_IMAGE_VARIANT)
    }
}

// ---------------------------------------------------------------------------
// RawPrinting — A bulk-download record (printing plus its card identity)
// ---------------------------------------------------------------------------

/// One record of a bulk card download.
///
/// Carries the shared descriptive fields of the logical card alongside the
/// printing itself. Records without an oracle id cannot be grouped and are
/// dropped during ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrinting {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub oracle_id: Option<String>,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(flatten)]
    pub printing: Printing,
}
