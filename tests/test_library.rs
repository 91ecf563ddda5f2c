//! End-to-end tests through the `Library` facade and the catalog queries.

mod common;

use std::collections::HashMap;

use mtg_collections::models::{PriceThreshold, PriceThresholdTable, PriceTables};
use mtg_collections::queries::{CardQuery, SchemeQuery};
use mtg_collections::{CollectionsError, Library};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn library(dir: &std::path::Path) -> Library {
    common::init_logging();
    Library::builder().data_dir(dir).build().unwrap()
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

#[test]
fn fresh_library_is_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let lib = library(tmp.path());

    assert!(lib.catalog().is_empty());
    assert!(lib.collections().is_empty());
    assert_eq!(lib.price_field(), "usd");
}

#[test]
fn ingest_import_value_save_and_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let mut lib = library(tmp.path());

    let report = lib.ingest_bulk(&common::sample_bulk_bytes()).unwrap();
    assert_eq!(report.cards, lib.catalog().len());

    let failed = lib
        .import_collection("Burn", "4 Lightning Bolt\n20 Island\nMystery Card")
        .unwrap();
    assert_eq!(failed.len(), 1);

    let burn = lib.collections().get("Burn").unwrap();
    assert_eq!(lib.prices().collection_total(burn).unwrap(), 13.0);
    lib.save_collections().unwrap();

    let reopened = library(tmp.path());
    assert_eq!(reopened.catalog().len(), 9);
    assert_eq!(reopened.collections().get("Burn"), lib.collections().get("Burn"));
    assert_eq!(
        reopened.export("Burn", "text").unwrap(),
        "4 Lightning Bolt\n20 Island"
    );
}

#[test]
fn import_merges_into_existing_collection() {
    let tmp = tempfile::tempdir().unwrap();
    let mut lib = library(tmp.path());
    lib.ingest_bulk(&common::sample_bulk_bytes()).unwrap();

    lib.import_collection("Lands", "2 Forest").unwrap();
    lib.import_collection("Lands", "3 Forest\nIsland").unwrap();

    let lands = lib.collections().get("Lands").unwrap();
    assert_eq!(lands.len(), 2);
    assert_eq!(lands.entries()[0].amount, 5);
}

#[test]
fn export_reports_unknown_collection_and_profile() {
    let tmp = tempfile::tempdir().unwrap();
    let mut lib = library(tmp.path());
    lib.collections_mut().create("Empty").unwrap();

    assert!(matches!(lib.export("Nope", "text"), Err(CollectionsError::NotFound(_))));
    assert!(matches!(lib.export("Empty", "xml"), Err(CollectionsError::NotFound(_))));
}

#[test]
fn price_config_file_in_data_dir_is_used() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("prices.json"),
        r#"{"*": [{"min": 0, "color": "blue"}]}"#,
    )
    .unwrap();

    let lib = library(tmp.path());
    assert_eq!(lib.pricing().color_of(1.0, "usd"), Some("blue"));
}

#[test]
fn explicit_tables_and_field_override_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let tables = PriceTables::new(HashMap::from([(
        "eur".to_string(),
        PriceThresholdTable::new(vec![PriceThreshold {
            min: 1.0,
            color: "purple".to_string(),
        }]),
    )]));
    let mut lib = Library::builder()
        .data_dir(tmp.path())
        .price_field("eur")
        .price_tables(tables)
        .build()
        .unwrap();
    lib.ingest_bulk(&common::sample_bulk_bytes()).unwrap();
    lib.import_collection("Bolts", "2 Lightning Bolt").unwrap();

    let bolts = lib.collections().get("Bolts").unwrap().clone();
    let shown = lib.prices().collection_display(&bolts).unwrap();
    assert_eq!(shown.text, "3.60");
    assert_eq!(shown.color.as_deref(), Some("purple"));

    lib.set_price_field("usd");
    assert_eq!(lib.prices().collection_total(&bolts).unwrap(), 4.0);
}

#[test]
fn display_summarizes_library() {
    let tmp = tempfile::tempdir().unwrap();
    let mut lib = library(tmp.path());
    lib.collections_mut().create("Decks").unwrap();

    let shown = lib.to_string();
    assert!(shown.contains("cards=0"));
    assert!(shown.contains("collections=[Decks]"));
}

// ---------------------------------------------------------------------------
// Card queries
// ---------------------------------------------------------------------------

#[test]
fn filter_by_name_ignores_case() {
    let (catalog, _tmp) = common::setup_catalog();
    let cards = CardQuery::new(&catalog);

    let names: Vec<&str> = cards.filter_by_name("ISL").iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Island", "Island"]);
    assert_eq!(cards.filter_by_name("").len(), catalog.len());
}

#[test]
fn commanders_are_legendary_creatures() {
    let (catalog, _tmp) = common::setup_catalog();
    let commanders = CardQuery::new(&catalog).commanders();

    assert_eq!(commanders.len(), 1);
    assert_eq!(commanders[0].oracle_id, common::ATRAXA);
    assert_eq!(commanders[0].url_slug(), "atraxa-praetors-voice");
}

#[test]
fn url_slug_uses_front_face() {
    let (catalog, _tmp) = common::setup_catalog();
    assert_eq!(catalog.get(common::FIRE_ICE).unwrap().url_slug(), "fire");
}

#[test]
fn printing_by_uid_finds_printing() {
    let (catalog, _tmp) = common::setup_catalog();
    let cards = CardQuery::new(&catalog);

    let found = cards
        .printing_by_uid(common::BOLT, "Double Masters (2XM#129)")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, "p-bolt-2xm");
    assert!(cards.printing_by_uid(common::BOLT, "nope").unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Schemes
// ---------------------------------------------------------------------------

#[test]
fn schemes_are_grouped_by_set_name() {
    let (catalog, _tmp) = common::setup_catalog();
    let sets = SchemeQuery::new(&catalog).by_set().unwrap();

    let set_names: Vec<&str> = sets.keys().map(String::as_str).collect();
    assert_eq!(set_names, vec!["Archenemy Schemes", "Archenemy: Nicol Bolas Schemes"]);
    assert_eq!(sets["Archenemy Schemes"].len(), 2);
}

#[test]
fn shuffled_deck_contains_each_selected_scheme_once() {
    let (catalog, _tmp) = common::setup_catalog();
    let schemes = SchemeQuery::new(&catalog);
    let mut rng = StdRng::seed_from_u64(7);

    let selected = [common::SCHEME_WILL, common::SCHEME_TIME, common::SCHEME_BOLAS];
    let deck = schemes.shuffled_deck(&selected, &mut rng).unwrap();

    let mut ids: Vec<&str> = deck.iter().map(|p| p.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["p-scheme-bolas", "p-scheme-time", "p-scheme-will"]);
}

#[test]
fn shuffled_deck_rejects_non_schemes() {
    let (catalog, _tmp) = common::setup_catalog();
    let mut rng = StdRng::seed_from_u64(1);

    let err = SchemeQuery::new(&catalog)
        .shuffled_deck(&[common::BOLT], &mut rng)
        .unwrap_err();
    assert!(matches!(err, CollectionsError::InvalidArgument(_)));
}

// ---------------------------------------------------------------------------
// Async wrapper
// ---------------------------------------------------------------------------

#[cfg(feature = "async")]
#[tokio::test]
async fn async_library_ingests_off_thread() {
    let tmp = tempfile::tempdir().unwrap();
    let lib = mtg_collections::AsyncLibrary::builder()
        .data_dir(tmp.path())
        .build()
        .await
        .unwrap();

    let report = lib.ingest_bulk(common::sample_bulk_bytes()).await.unwrap();
    assert_eq!(report.cards, 9);

    let failed = lib.import_collection("Deck", "4 Lightning Bolt").await.unwrap();
    assert!(failed.is_empty());
    let total = lib
        .run(|l| {
            let deck = l.collections().get("Deck").cloned();
            match deck {
                Some(d) => l.prices().collection_total(&d),
                None => Ok(0.0),
            }
        })
        .await
        .unwrap();
    assert_eq!(total, 8.0);
}
