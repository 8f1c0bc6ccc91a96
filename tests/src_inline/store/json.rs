use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::model::round::InputField;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("uav_scorekeeper_store_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn full_inputs() -> RoundInputs {
    RoundInputs {
        unloaded_payload: Some(420.0),
        requested_payload: Some(450.0),
        circuit_time: Some(61.5),
        glide_time: Some(14.25),
        altitude: Some(47.0),
        loading_time: Some(31.0),
        takeoff_distance: Some(40.0),
        team_pilot: Some(true),
        legal_flight: Some(true),
        good_landing: Some(false),
        no_replacement_parts: Some(true),
    }
}

#[test]
fn test_missing_file_loads_empty_store() {
    let dir = make_temp_dir();
    let repo = JsonFileRepository::new(dir.join("absent.json"));
    let store = repo.load().unwrap();
    assert_eq!(store, ResultsStore::new());
}

#[test]
fn test_invalid_json_is_corrupt() {
    let dir = make_temp_dir();
    let path = dir.join("results.json");
    fs::write(&path, "{ not json").unwrap();
    let err = JsonFileRepository::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[test]
fn test_unknown_category_is_corrupt() {
    let err = parse_document(r#"{"Open": {}}"#, Path::new("x.json")).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[test]
fn test_save_then_load_is_field_identical() {
    let dir = make_temp_dir();
    let repo = JsonFileRepository::new(dir.join("nested").join("results.json"));

    let mut store = ResultsStore::new();
    let mut first = RoundResult::new(0, full_inputs());
    first.score = Some(612.34);
    store.upsert_round(Category::Academic, 12, first);
    store.upsert_round(Category::Academic, 12, RoundResult::new(1, full_inputs()));
    store.upsert_round(Category::Clubs, 3, RoundResult::new(0, full_inputs()));
    store.set_static_score(Category::Academic, 12, 240.5);
    store.set_penalty(Category::Clubs, 3, 20.0, Some("unsafe pass".to_string()));
    store.set_static_score(Category::Clubs, 8, 10.0);

    repo.save(&store).unwrap();
    let loaded = repo.load().unwrap();
    assert_eq!(loaded, store);

    repo.save(&loaded).unwrap();
    assert_eq!(repo.load().unwrap(), store);
}

#[test]
fn test_legacy_document_shapes() {
    let text = r#"{
        "academic": {
            "5": [
                512.5,
                {"inputs": {}, "score": 480.0},
                {"round": 4, "inputs": {"Unloaded Payload": 300, "Pilot": 1}}
            ]
        },
        "Clubs": {},
        "static_scores": {"Academic": {"5": 250}},
        "penalties": {"Academic": {"5": 12.5}},
        "penalty_reasons": {"Academic": {"5": "overweight"}}
    }"#;
    let store = parse_document(text, Path::new("legacy.json")).unwrap();
    let rounds = store.team_rounds(Category::Academic, 5);
    assert_eq!(rounds.len(), 3);
    assert_eq!(rounds[0].round, 0);
    assert_eq!(rounds[0].score, Some(512.5));
    assert!(!rounds[0].has_inputs());
    assert_eq!(rounds[1].round, 1);
    assert_eq!(rounds[1].score, Some(480.0));
    assert_eq!(rounds[2].round, 4);
    assert_eq!(rounds[2].inputs.team_pilot, Some(true));
    assert_eq!(store.static_score(Category::Academic, 5), Some(250.0));
    assert_eq!(store.penalty(Category::Academic, 5), Some(12.5));
    assert_eq!(store.penalty_reason(Category::Academic, 5), Some("overweight"));
}

#[test]
fn test_duplicate_round_keeps_later_entry() {
    let text = r#"{"Academic": {"1": [
        {"round": 0, "inputs": {"Altitude": 10}},
        {"round": 0, "inputs": {"Altitude": 20}}
    ]}}"#;
    let store = parse_document(text, Path::new("dup.json")).unwrap();
    let rounds = store.team_rounds(Category::Academic, 1);
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].inputs.altitude, Some(20.0));
}

#[test]
fn test_rendered_document_uses_original_keys() {
    let mut store = ResultsStore::new();
    store.upsert_round(Category::Clubs, 2, RoundResult::new(0, full_inputs()));
    let text = render_document(&store).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entry = &value["Clubs"]["2"][0];
    assert_eq!(entry["round"], 0);
    assert_eq!(entry["inputs"][InputField::GlideTime.key()], 14.25);
    assert_eq!(entry["inputs"]["Good Landing"], false);
    assert!(entry.get("score").is_none());
    assert!(value["Academic"].as_object().unwrap().is_empty());
    assert!(value.get("static_scores").is_none());
}

#[test]
fn test_penalty_reason_joined_across_key_case() {
    let text = r#"{
        "Academic": {},
        "penalties": {"Academic": {"3": 10}, "clubs": {" 4": 5}},
        "penalty_reasons": {"academic": {"3": "late"}, "CLUBS": {"4": "noise"}, "Clubs": {"9": "orphan"}}
    }"#;
    let store = parse_document(text, Path::new("mixed.json")).unwrap();
    assert_eq!(store.penalty(Category::Academic, 3), Some(10.0));
    assert_eq!(store.penalty_reason(Category::Academic, 3), Some("late"));
    assert_eq!(store.penalty_reason(Category::Clubs, 4), Some("noise"));
    assert_eq!(store.penalty_reason(Category::Clubs, 9), None);

    let reloaded = parse_document(&render_document(&store).unwrap(), Path::new("mixed.json")).unwrap();
    assert_eq!(reloaded.penalty_reason(Category::Academic, 3), Some("late"));
}
