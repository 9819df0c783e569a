//! Decoding realistic upstream pages into typed records.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use trap_core::entities::decode_records;
use trap_core::{RecordId, Sampling, Trap};

fn traps_page() -> Vec<Value> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "entryPoint": "Harbour",
            "island": "North",
            "installationDate": "2024-03-01T00:00:00Z",
            "leavingDate": null,
            "latitude": 28.1,
            "longitude": -15.4
        },
        {
            "id": 2,
            "entryPoint": "Airport",
            "island": "South",
            "installationDate": "2024-03-05",
            "leavingDate": "2024-06-30"
        }
    ]))
    .unwrap()
}

fn samplings_page() -> Vec<Value> {
    serde_json::from_value(json!([
        {
            "id": 100,
            "trapId": 1,
            "date": "2024-04-01T10:30:00Z",
            "presenceOfIndividuals": true,
            "analyzes": [
                {
                    "person": "ana",
                    "date": "2024-04-02",
                    "results": [
                        {"species": "Vespa velutina", "caste": "worker", "count": 4},
                        {"species": "Vespa velutina", "caste": "queen", "count": 1}
                    ]
                }
            ]
        },
        {
            "id": 101,
            "trapId": 99,
            "date": "2024-04-03T10:30:00Z",
            "presenceOfIndividuals": false
        }
    ]))
    .unwrap()
}

#[test]
fn traps_decode_with_extra_attributes() {
    let traps: Vec<Trap> = decode_records("traps", traps_page()).unwrap();

    assert_eq!(traps.len(), 2);
    assert_eq!(traps[0].id(), &RecordId::Number(1));
    assert!(traps[0].is_active());
    assert!(!traps[1].is_active());
    assert_eq!(traps[0].get("latitude"), Some(&json!(28.1)));
}

#[test]
fn samplings_decode_with_optional_analyses() {
    let samplings: Vec<Sampling> = decode_records("samplings", samplings_page()).unwrap();

    assert_eq!(samplings.len(), 2);
    let analyses: Vec<_> = samplings[0].analyses().collect();
    assert_eq!(analyses[0].person(), Some("ana"));
    assert_eq!(analyses[0].results().len(), 2);
    assert_eq!(analyses[0].to_value()["date"], json!("2024-04-02"));
    assert_eq!(samplings[1].analyses().count(), 0);
    assert_eq!(samplings[1].trap_id(), Some(RecordId::Number(99)));
}

#[test]
fn decoded_records_serialize_to_the_page_items() {
    let page = traps_page();
    let traps: Vec<Trap> = decode_records("traps", page.clone()).unwrap();
    let value = serde_json::to_value(&traps).unwrap();

    assert_eq!(value, Value::Array(page));
}

#[test]
fn absent_keys_stay_absent() {
    let samplings: Vec<Sampling> = decode_records("samplings", samplings_page()).unwrap();
    let value = serde_json::to_value(&samplings[1]).unwrap();

    assert!(value.get("analyzes").is_none());
    assert!(value.get("entryPoint").is_none());
}
