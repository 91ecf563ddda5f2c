//! Shared test fixtures for the collection manager integration tests.
//!
//! Provides a small bulk download covering basic lands, a multi-printing
//! staple, a split card, a legendary creature, scheme cards, a name collision
//! and a record without an oracle id.

#![allow(dead_code)]

use mtg_collections::CardCatalog;
use serde_json::{json, Value};

pub const ISLAND: &str = "oid-island";
pub const ISLAND_ALT: &str = "oid-island-playtest";
pub const FOREST: &str = "oid-forest";
pub const BOLT: &str = "oid-bolt";
pub const FIRE_ICE: &str = "oid-fire-ice";
pub const ATRAXA: &str = "oid-atraxa";
pub const SCHEME_WILL: &str = "oid-scheme-will";
pub const SCHEME_TIME: &str = "oid-scheme-time";
pub const SCHEME_BOLAS: &str = "oid-scheme-bolas";

#[allow(clippy::too_many_arguments)]
fn printing(
    id: &str,
    oracle_id: Option<&str>,
    name: &str,
    type_line: &str,
    set: &str,
    set_name: &str,
    number: &str,
    layout: &str,
    prices: Value,
) -> Value {
    let mut card = json!({
        "id": id,
        "name": name,
        "type_line": type_line,
        "oracle_text": "",
        "color_identity": [],
        "set": set,
        "set_name": set_name,
        "collector_number": number,
        "layout": layout,
        "image_uris": { "normal": format!("https://img.example/{}.jpg", id) },
        "prices": prices,
        "lang": "en"
    });
    if let Some(oid) = oracle_id {
        card["oracle_id"] = json!(oid);
    }
    card
}

/// Raw bulk records in download order.
pub fn sample_bulk() -> Vec<Value> {
    let mut records = vec![
        printing(
            "p-island-m21", Some(ISLAND), "Island", "Basic Land — Island",
            "m21", "Core Set 2021", "262", "normal",
            json!({ "usd": "0.25", "usd_foil": "1.00", "eur": null, "tix": "0.01" }),
        ),
        printing(
            "p-forest-m21", Some(FOREST), "Forest", "Basic Land — Forest",
            "m21", "Core Set 2021", "274", "normal",
            json!({ "usd": "0.20", "usd_foil": null, "tix": "0.01" }),
        ),
        printing(
            "p-bolt-a25", Some(BOLT), "Lightning Bolt", "Instant",
            "a25", "Masters 25", "141", "normal",
            json!({ "usd": "2.00", "usd_foil": "6.00", "eur": "1.80", "tix": "0.03" }),
        ),
        printing(
            "p-island-znr", Some(ISLAND), "Island", "Basic Land — Island",
            "znr", "Zendikar Rising", "381", "normal",
            json!({ "usd": "0.10", "usd_foil": null, "tix": "0.02" }),
        ),
        printing(
            "p-bolt-2xm", Some(BOLT), "Lightning Bolt", "Instant",
            "2xm", "Double Masters", "129", "normal",
            json!({ "usd": "1.50", "usd_foil": "5.00", "eur": null }),
        ),
        printing(
            "p-island-playtest", Some(ISLAND_ALT), "Island", "Basic Land — Island",
            "cmb1", "Mystery Booster Playtest Cards", "99", "normal",
            json!({ "usd": "3.00" }),
        ),
        printing(
            "p-atraxa-c16", Some(ATRAXA), "Atraxa, Praetors' Voice",
            "Legendary Creature — Phyrexian Angel Horror",
            "c16", "Commander 2016", "28", "normal",
            json!({ "usd": "25.00", "usd_foil": "60.00" }),
        ),
        printing(
            "p-scheme-will", Some(SCHEME_WILL), "Your Will Is Not Your Own", "Scheme",
            "oarc", "Archenemy Schemes", "45", "scheme",
            json!({ "usd": null }),
        ),
        printing(
            "p-scheme-time", Some(SCHEME_TIME), "All in Good Time", "Scheme",
            "oarc", "Archenemy Schemes", "1", "scheme",
            json!({ "usd": null }),
        ),
        printing(
            "p-scheme-bolas", Some(SCHEME_BOLAS), "The Very Soil Shall Shake", "Ongoing Scheme",
            "oe01", "Archenemy: Nicol Bolas Schemes", "20", "scheme",
            json!({ "usd": null }),
        ),
        printing(
            "p-token-no-oracle", None, "Zombie", "Token Creature — Zombie",
            "tm21", "Core Set 2021 Tokens", "5", "token",
            json!({ "usd": "0.05" }),
        ),
    ];

    let mut fire_ice = printing(
        "p-fire-ice-mh2", Some(FIRE_ICE), "Fire // Ice", "Instant // Instant",
        "mh2", "Modern Horizons 2", "290", "split",
        json!({ "usd": "0.40", "usd_foil": "1.20" }),
    );
    fire_ice["card_faces"] = json!([
        {
            "name": "Fire",
            "type_line": "Instant",
            "oracle_text": "Fire deals 2 damage divided as you choose among one or two targets.",
            "image_uris": { "normal": "https://img.example/fire.jpg" }
        },
        {
            "name": "Ice",
            "type_line": "Instant",
            "oracle_text": "Tap target permanent.\nDraw a card.",
            "image_uris": { "normal": "https://img.example/ice.jpg" }
        }
    ]);
    records.push(fire_ice);
    records
}

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sample_bulk_bytes() -> Vec<u8> {
    serde_json::to_vec(&Value::Array(sample_bulk())).unwrap()
}

/// Ingest the sample bulk into a temp directory and load it.
///
/// Returns `(CardCatalog, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive so the variation files stay readable.
pub fn setup_catalog() -> (CardCatalog, tempfile::TempDir) {
    init_logging();
    let tmp_dir = tempfile::tempdir().unwrap();
    let catalog_dir = tmp_dir.path().join("catalog");
    CardCatalog::ingest_bytes(&sample_bulk_bytes(), &catalog_dir).unwrap();
    let catalog = CardCatalog::load(&catalog_dir.join("cards.json")).unwrap();
    (catalog, tmp_dir)
}
