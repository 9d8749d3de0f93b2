mod common;

use folio_core::model::{ContentData, ContentType};
use folio_journal::Journal;

#[test]
fn sections_span_the_page_boundary() {
    let source = common::parse(
        r#"<Intro>
  <page number="1">
    <chapter_title>INTRODUCTION</chapter_title>
    <section>Running the Adventure</section>
    <paragraph>This is the intro.</paragraph>
  </page>
  <page number="2">
    <section>The Dungeon Master</section>
    <paragraph>DM info here.</paragraph>
  </page>
</Intro>"#,
    );
    let journal = Journal::build(source);

    assert_eq!(journal.chapters().len(), 1);
    let chapter = &journal.chapters()[0];
    assert_eq!(chapter.id, "chapter_1");
    assert_eq!(chapter.heading, "INTRODUCTION");
    assert!(chapter.content.is_empty());
    assert_eq!(chapter.sections.len(), 2);

    let s1 = &chapter.sections[0];
    let s2 = &chapter.sections[1];
    assert_eq!(s1.heading, "Running the Adventure");
    assert_eq!(s2.heading, "The Dungeon Master");
    assert_eq!(s1.id, "chapter_1_section_1");
    assert_eq!(s2.id, "chapter_1_section_2");
    assert_eq!(s1.content[0].id, "chapter_1_section_1_content_1");
    assert_eq!(s1.content[0].data.as_text(), Some("This is the intro."));
    assert_eq!(s2.content[0].id, "chapter_1_section_2_content_1");
    assert_eq!(s2.content[0].data.as_text(), Some("DM info here."));
}

#[test]
fn image_placeholders_are_registered_and_stay_in_the_stream() {
    let source = common::parse(
        r#"<M><page number="5">
    <chapter_title>GOBLIN ARROWS</chapter_title>
    <section>Ambush</section>
    <paragraph>Before.</paragraph>
    <image_ref key="page_5_top_battle_map"/>
    <paragraph>After.</paragraph>
</page></M>"#,
    );
    let journal = Journal::build(source);

    let entry = journal
        .image_registry()
        .get("page_5_top_battle_map")
        .expect("placeholder must be registered");
    assert_eq!(entry.page_num, Some(5));
    assert_eq!(entry.position, "top");
    assert_eq!(entry.image_type, "battle_map");
    assert_eq!(entry.source.as_str(), "extracted");
    assert_eq!(entry.insert_before_content_id, None);

    let section = &journal.chapters()[0].sections[0];
    let kinds: Vec<&ContentType> = section.content.iter().map(|c| &c.content_type).collect();
    assert_eq!(
        kinds,
        vec![&ContentType::Paragraph, &ContentType::ImageRef, &ContentType::Paragraph]
    );
    assert_eq!(
        section.content[1].data,
        ContentData::ImageRef("page_5_top_battle_map".into())
    );
    assert_eq!(section.content[1].id, "chapter_1_section_1_content_2");
}

#[test]
fn reposition_changes_only_the_anchor() {
    let source = common::parse(&common::read_fixture("module.xml"));
    let mut journal = Journal::build(source);
    let before = journal.image_registry().get("page_5_top_battle_map").cloned().unwrap();

    assert!(journal.reposition_image("page_5_top_battle_map", "chapter_1_section_2_content_1"));

    let after = journal.image_registry().get("page_5_top_battle_map").unwrap();
    assert_eq!(
        after.insert_before_content_id.as_deref(),
        Some("chapter_1_section_2_content_1")
    );
    assert_eq!(after.page_num, before.page_num);
    assert_eq!(after.image_type, before.image_type);
    assert_eq!(after.position, before.position);
    assert_eq!(after.description, before.description);
    assert_eq!(after.source, before.source);
}

#[test]
fn module_fixture_builds_all_levels() {
    let source = common::parse(&common::read_fixture("module.xml"));
    let (journal, report) =
        folio_journal::Journal::build_with_options(source.clone(), Default::default());

    assert_eq!(report.chapters, 2);
    assert_eq!(report.sections, 3);
    assert_eq!(report.subsections, 2);
    assert_eq!(report.subsubsections, 1);
    assert!(report.is_lossless());
    assert_eq!(journal.non_heading_count(), source.non_heading_count());

    let ch2 = &journal.chapters()[1];
    assert_eq!(ch2.heading, "GOBLIN ARROWS");
    let dev = &ch2.sections[0].subsections[0];
    assert_eq!(dev.id, "chapter_2_section_1_subsection_1");
    assert!(dev.content.is_empty());
    let flee = &dev.subsubsections[0];
    assert_eq!(flee.id, "chapter_2_section_1_subsection_1_subsubsection_1");
    assert_eq!(flee.heading, "If the Goblins Flee");
    assert_eq!(flee.content.len(), 2);
    assert_eq!(
        flee.content[1].content_type,
        ContentType::Other("sidebar".into())
    );
    assert_eq!(
        report.count(folio_journal::DiagnosticCode::UnknownTagDegraded),
        1
    );

    let rolling = &journal.chapters()[0].sections[1].subsections[0];
    assert_eq!(rolling.heading, "Rolling Dice");
    assert_eq!(rolling.content[0].id, "chapter_1_section_2_subsection_1_content_1");

    assert_eq!(
        journal
            .find_content("chapter_2_section_1_content_5")
            .map(|c| &c.content_type),
        Some(&ContentType::StatBlock)
    );
}

#[test]
fn chapter_heading_is_empty_when_payload_is_not_text() {
    use folio_core::model::{ContentElement, ListItems, Page, XMLDocument};
    use std::sync::Arc;

    let doc = XMLDocument::new(
        "T",
        vec![Page {
            number: 1,
            content: vec![ContentElement::new(
                "page_1_content_0",
                ContentType::ChapterTitle,
                ContentData::List(ListItems::default()),
            )],
        }],
    );
    let journal = Journal::build(Arc::new(doc));
    assert_eq!(journal.chapters()[0].heading, "");
}
