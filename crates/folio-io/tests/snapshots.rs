mod common;

use anyhow::Result;
use folio_io::hashing::journal_digest;
use folio_io::prelude::*;
use folio_io::snapshot::{parse_registry_snapshot_str, registry_snapshot_to_pretty_json};
use folio_io::version::{REGISTRY_SNAPSHOT_V, SNAPSHOT_V};

fn module_journal() -> Journal {
    load_journal(&common::read_fixture("module.xml"), BuildOptions::default())
        .expect("module fixture must load")
        .0
}

#[test]
fn journal_snapshot_has_the_expected_shape() -> Result<()> {
    let journal = module_journal();
    let value = serde_json::to_value(JournalSnapshot::of(&journal))?;

    assert_eq!(value["v"], SNAPSHOT_V);
    assert_eq!(value["title"], "Lost_Mine");
    assert_eq!(value["source_fingerprint"], journal.source_fingerprint());
    assert_eq!(value["chapters"][0]["id"], "chapter_1");
    assert_eq!(
        value["chapters"][0]["sections"][0]["content"][0]["type"],
        "paragraph"
    );
    assert!(value.get("unassigned").is_none());
    assert_eq!(value["images"]["page_5_top_battle_map"]["position"], "top");
    assert_eq!(value["images"]["page_5_top_battle_map"]["source"], "extracted");
    Ok(())
}

#[test]
fn digest_tracks_registry_edits_only() -> Result<()> {
    let mut journal = module_journal();
    let before = journal_digest(&journal)?;
    assert!(before.starts_with("sha256:"));
    assert_eq!(before, journal_digest(&module_journal())?);

    let fingerprint = journal.source_fingerprint().to_string();
    journal.reposition_image("page_5_top_battle_map", "chapter_2_section_1_content_1");

    assert_ne!(journal_digest(&journal)?, before);
    assert_eq!(journal.source_fingerprint(), fingerprint);
    Ok(())
}

#[test]
fn registry_snapshot_restores_placement_on_a_fresh_build() -> Result<()> {
    let mut edited = module_journal();
    edited.reposition_image("page_5_top_battle_map", "chapter_2_section_1_content_3");
    edited.add_image(
        "cover",
        ImageMetadata::new("cover", "full", ImageSource::Generated)
            .with_description("Cover art")
            .anchored_before("chapter_1_section_1_content_1"),
    );
    let json = registry_snapshot_to_pretty_json(&RegistrySnapshot::of(&edited))?;

    let mut fresh = module_journal();
    parse_registry_snapshot_str(&json)?.apply_to(&mut fresh);

    assert_eq!(fresh.image_registry(), edited.image_registry());
    assert_eq!(fresh.chapters(), edited.chapters());
    Ok(())
}

#[test]
fn registry_snapshot_rejects_unknown_versions() {
    let json = format!(r#"{{"v": {}, "images": {{}}}}"#, REGISTRY_SNAPSHOT_V + 1);
    let err = parse_registry_snapshot_str(&json).expect_err("future version must fail");
    assert!(matches!(err, SnapshotError::UnsupportedVersion { .. }));
    assert!(err.to_string().contains("unsupported registry snapshot version"));
}

#[test]
fn registry_snapshot_rejects_bad_input() {
    assert!(matches!(
        parse_registry_snapshot_str("{not json"),
        Err(SnapshotError::InvalidJson(_))
    ));
    assert!(matches!(
        parse_registry_snapshot_str(r#"{"v": 1, "images": []}"#),
        Err(SnapshotError::InvalidShape(_))
    ));
}
