mod common;

use std::collections::HashMap;

use anyhow::Result;
use folio_io::prelude::*;

#[test]
fn markup_to_rendered_output() -> Result<()> {
    let markup = common::read_fixture("module.xml");
    let media: HashMap<String, String> =
        serde_json::from_str(&common::read_fixture("media.json"))?;

    let (mut journal, report) = load_journal(&markup, BuildOptions::default())?;
    assert!(report.is_lossless());
    assert_eq!(report.chapters, 2);
    assert_eq!(journal.title(), "Lost_Mine");

    assert!(journal.reposition_image("page_5_top_battle_map", "chapter_2_section_1_content_3"));
    let html = render_journal(&journal, &media);
    assert!(html.contains("goblin-ambush.webp"));

    let reparsed = parse_document(&to_string(journal.source()))?;
    assert_eq!(&reparsed, journal.source().as_ref());
    Ok(())
}

#[test]
fn malformed_markup_is_reported() {
    let err = load_journal(&common::read_fixture("malformed.xml"), BuildOptions::default())
        .expect_err("malformed fixture must fail");
    assert!(matches!(err, MarkupError::MalformedDocument { .. }));
}

#[test]
fn collected_orphans_reach_the_journal() -> Result<()> {
    let (journal, report) = load_journal(
        &common::read_fixture("orphans.xml"),
        BuildOptions::collecting_orphans(),
    )?;
    assert!(report.is_lossless());
    assert_eq!(journal.unassigned().len(), report.unassigned);
    assert_eq!(journal.unassigned()[0].id, "unassigned_content_1");
    Ok(())
}
