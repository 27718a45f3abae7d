//! Browser-side checks of the JS-facing error paths
//!
//! Run with `wasm-pack test --headless --firefox crates/roadmap-wasm`.

#![cfg(target_arch = "wasm32")]

use roadmap_wasm::{export_csv, timeline_range, Roadmap};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const DATA: &str = r#"{
    "sprints": [
        { "id": "s1", "name": "Sprint 1", "startDate": "2025-01-01", "endDate": "2025-01-10" }
    ]
}"#;

fn message(err: wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_default()
}

#[wasm_bindgen_test]
fn timeline_range_rejects_bad_date() {
    let err = timeline_range("not-a-date", "month").unwrap_err();
    assert!(message(err).starts_with("Invalid date"));
}

#[wasm_bindgen_test]
fn timeline_range_rejects_unknown_granularity() {
    let err = timeline_range("2025-01-15", "week").unwrap_err();
    assert!(message(err).contains("week"));
}

#[wasm_bindgen_test]
fn export_csv_rejects_malformed_dataset() {
    let err = export_csv("{", "2025-01-15", "month", "", false).unwrap_err();
    assert!(message(err).starts_with("Malformed dataset"));

    let csv = export_csv(DATA, "2025-01-15", "month", "", false).unwrap();
    assert_eq!(csv.lines().count(), 2);
}

#[wasm_bindgen_test]
fn session_records_and_clears_last_error() {
    let mut roadmap = Roadmap::new();
    assert!(roadmap.load("[1, 2").is_err());
    assert!(roadmap.get_last_error().is_some());

    assert!(roadmap.set_granularity("decade").is_err());
    assert!(roadmap.get_last_error().unwrap().contains("decade"));

    roadmap.load(DATA).unwrap();
    assert_eq!(roadmap.get_last_error(), None);

    assert!(roadmap.navigate("sideways").is_err());
    assert!(roadmap.set_today("31/31/2025").is_err());
    assert!(roadmap.set_filters("{\"status\": 3}").is_err());
    assert!(roadmap.restore_interaction_state("nope").is_err());
    assert!(roadmap.get_last_error().is_some());
}
