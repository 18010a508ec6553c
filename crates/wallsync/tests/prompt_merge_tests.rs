//! The manifest-merge variant: a prompt corpus associates generated images
//! with their originating caption and switches the manifest to the keyed
//! object format.

mod common;

use common::SyncHarness;

const CORPUS: &str = r#"{
    "prompts": [
        {
            "id": 1,
            "title": "sunset beach",
            "content": "golden sand with waves at dusk",
            "tags": ["beach", "sunset"]
        },
        {
            "id": 2,
            "title": "city skyline",
            "content": "neon towers at night",
            "tags": ["city"]
        }
    ]
}"#;

#[test]
fn test_matched_prompt_supplies_description_and_tags() {
    let mut harness = SyncHarness::new();
    harness.write_prompt_corpus(CORPUS);
    harness.add_image("sunset beach_03.png", 4, 3);

    let report = harness.run().unwrap();
    assert_eq!(report.matched_prompts, 1);

    let entries = harness.manifest_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].description, "golden sand with waves at dusk");
    assert!(entries[0].tags.contains(&"beach".to_string()));
    assert!(entries[0].tags.contains(&"sunset".to_string()));
}

#[test]
fn test_merged_manifest_uses_wallpapers_key() {
    let mut harness = SyncHarness::new();
    harness.write_prompt_corpus(CORPUS);
    harness.add_image("sunset beach_03.png", 4, 3);

    harness.run().unwrap();

    let raw = String::from_utf8(harness.manifest_bytes()).unwrap();
    assert!(raw.trim_start().starts_with('{'));
    assert!(raw.contains("\"wallpapers\""));
}

#[test]
fn test_unrelated_filename_stays_unmatched() {
    let mut harness = SyncHarness::new();
    harness.write_prompt_corpus(CORPUS);
    harness.add_image("qqqq.png", 4, 3);

    let report = harness.run().unwrap();

    assert_eq!(report.matched_prompts, 0);
    let entries = harness.manifest_entries();
    assert_eq!(entries[0].description, "");
}

#[test]
fn test_best_scoring_prompt_wins() {
    let mut harness = SyncHarness::new();
    harness.write_prompt_corpus(CORPUS);
    harness.add_image("city skyline_1.png", 4, 3);

    let report = harness.run().unwrap();
    assert_eq!(report.matched_prompts, 1);

    let entries = harness.manifest_entries();
    assert_eq!(entries[0].description, "neon towers at night");
}

#[test]
fn test_missing_corpus_file_is_a_config_error() {
    let mut harness = SyncHarness::new();
    harness.prompt_corpus = Some(harness.wallpapers_dir.join("nope.json"));
    harness.add_image("a.jpg", 4, 3);

    let result = harness.run();
    assert!(matches!(result, Err(wallsync::WallsyncError::Config(_))));
}
