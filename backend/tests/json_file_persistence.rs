//! Recorder and loader working against a real data directory.

use std::sync::Arc;

use hbnb::domain::ports::EntityService;
use hbnb::domain::{Entity, EntityKind};
use hbnb::outbound::json_file::{JsonFileLoader, JsonFileRecorder};
use hbnb::outbound::memory::in_memory_stores;
use hbnb::test_support::cap_fs::{read_file_to_string, write_file};
use hbnb::test_support::{fields, fixture_clock, memory_marketplace_with, temp_data_dir};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;

#[fixture]
fn data_dir() -> TempDir {
    temp_data_dir()
}

#[rstest]
#[tokio::test]
async fn created_records_survive_a_reload(data_dir: TempDir) {
    let recorder = JsonFileRecorder::open(data_dir.path()).expect("recorder");
    let market = memory_marketplace_with(fixture_clock(), Arc::new(recorder));

    let country = market
        .countries
        .create(fields(json!({ "name": "Australia", "code": "AU" })))
        .await
        .expect("country");
    let city = market
        .cities
        .create(fields(json!({ "name": "Perth", "country_id": country.id().to_string() })))
        .await
        .expect("city");
    market
        .amenities
        .create(fields(json!({ "name": "WiFi" })))
        .await
        .expect("amenity");

    let raw = read_file_to_string(data_dir.path(), "city.json").expect("city file");
    assert!(raw.contains("\n    \"City\""), "four-space indent: {raw}");
    let doc: Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(doc["City"][0]["id"], json!(city.id().to_string()));

    let stores = in_memory_stores();
    let summary = JsonFileLoader::open(data_dir.path())
        .expect("loader")
        .seed_all(&stores)
        .await
        .expect("seed");

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.skipped, 0);
    let reloaded = stores.cities.get(city.id()).await.expect("store").expect("city row");
    assert_eq!(reloaded.name().as_str(), "Perth");
    assert_eq!(reloaded.metadata(), city.metadata());
}

#[rstest]
#[tokio::test]
async fn legacy_rows_load_and_invalid_rows_are_skipped(data_dir: TempDir) {
    let rows = json!({
        "Amenity": [
            {
                "id": "0c4f2a8e-2b9f-4d8a-9b7e-1f5a3c6d7e80",
                "name": "Pool",
                "created_at": 1_717_232_400.5,
                "updated_at": 1_717_232_400.5,
            },
            { "id": "not-a-uuid", "name": "Sauna" },
        ],
    });
    write_file(
        data_dir.path(),
        "amenity.json",
        serde_json::to_string(&rows).expect("encode").as_bytes(),
    )
    .expect("write");

    let stores = in_memory_stores();
    let summary = JsonFileLoader::open(data_dir.path())
        .expect("loader")
        .seed_all(&stores)
        .await
        .expect("seed");

    assert_eq!(summary.skipped, 1);
    assert!(summary.loaded.contains(&(EntityKind::Amenity, 1)));
    let amenities = stores.amenities.list().await.expect("list");
    assert_eq!(amenities.len(), 1);
    assert_eq!(amenities[0].metadata().created_at().timestamp(), 1_717_232_400);
}

#[rstest]
#[tokio::test]
async fn rows_breaking_uniqueness_are_skipped(data_dir: TempDir) {
    let country_id = "5b0e6c1a-8f0e-4c57-9d0a-2a1f4b3c5d60";
    let files = [
        (
            "country.json",
            json!({ "Country": [
                { "id": country_id, "name": "Australia", "code": "AU",
                  "created_at": 1_717_232_400, "updated_at": 1_717_232_400 },
                { "id": "6c1f7d2b-9a1f-4d68-8e1b-3b2a5c4d6e71", "name": "Austria", "code": "AU",
                  "created_at": 1_717_232_400, "updated_at": 1_717_232_400 },
            ] }),
        ),
        (
            "city.json",
            json!({ "City": [
                { "id": "7d2a8e3c-0b2a-4e79-8f2c-4c3b6d5e7f82", "name": "Perth",
                  "country_id": country_id,
                  "created_at": 1_717_232_400, "updated_at": 1_717_232_400 },
                { "id": "8e3b9f4d-1c3b-4f8a-9a3d-5d4c7e6f8a93", "name": "Perth",
                  "country_id": country_id,
                  "created_at": 1_717_232_400, "updated_at": 1_717_232_400 },
            ] }),
        ),
        (
            "amenity.json",
            json!({ "Amenity": [
                { "id": "9f4c0a5e-2d4c-4a9b-8b4e-6e5d8f7a9b04", "name": "WiFi",
                  "created_at": 1_717_232_400, "updated_at": 1_717_232_400 },
                { "id": "a05d1b6f-3e5d-4bac-9c5f-7f6e9a8b0c15", "name": "WiFi",
                  "created_at": 1_717_232_400, "updated_at": 1_717_232_400 },
            ] }),
        ),
    ];
    for (name, rows) in &files {
        write_file(
            data_dir.path(),
            name,
            serde_json::to_string(rows).expect("encode").as_bytes(),
        )
        .expect("write");
    }

    let stores = in_memory_stores();
    let summary = JsonFileLoader::open(data_dir.path())
        .expect("loader")
        .seed_all(&stores)
        .await
        .expect("seed");

    assert_eq!(summary.skipped, 3);
    for kind in [EntityKind::Country, EntityKind::City, EntityKind::Amenity] {
        assert!(summary.loaded.contains(&(kind, 1)), "{kind} loaded once");
    }
    let countries = stores.countries.list().await.expect("list");
    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].name().as_str(), "Australia");
    assert_eq!(stores.cities.list().await.expect("list").len(), 1);
    assert_eq!(stores.amenities.list().await.expect("list").len(), 1);
}
