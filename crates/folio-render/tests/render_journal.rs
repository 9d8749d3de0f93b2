mod common;

use std::collections::HashMap;

use folio_core::media::{ImageMetadata, ImageSource};
use folio_journal::{BuildOptions, Journal};
use folio_render::{RenderOptions, render_journal, render_journal_with};

const BATTLE_MAP: &str = "page_5_top_battle_map";
const BATTLE_MAP_URL: &str = "https://cdn.example.test/maps/goblin-ambush.webp";

fn module_journal() -> Journal {
    Journal::build(common::parse(&common::read_fixture("module.xml")))
}

fn media() -> HashMap<String, String> {
    HashMap::from([(BATTLE_MAP.to_string(), BATTLE_MAP_URL.to_string())])
}

#[test]
fn headings_follow_container_depth() {
    let html = render_journal(&module_journal(), &HashMap::new());

    assert!(html.starts_with("<h1>INTRODUCTION</h1>\n<h2>Running the Adventure</h2>\n"));
    assert!(html.contains("<h3>Rolling Dice</h3>"));
    assert!(html.contains("<h4>If the Goblins Flee</h4>"));

    let chapter_two = html.find("<h1>GOBLIN ARROWS</h1>").expect("second chapter");
    let dm = html.find("<h2>The Dungeon Master</h2>").expect("second section");
    assert!(dm < chapter_two);
}

#[test]
fn own_content_renders_before_child_containers() {
    let html = render_journal(&module_journal(), &HashMap::new());

    let dm_text = html.find("<p>DM info here.</p>").expect("section text");
    let sub = html.find("<h3>Rolling Dice</h3>").expect("subsection heading");
    assert!(dm_text < sub);
}

#[test]
fn boxed_text_uses_its_own_wrapper() {
    let html = render_journal(&module_journal(), &HashMap::new());
    assert!(html.contains(
        "<blockquote class=\"boxed-text\">Read this aloud to the players.</blockquote>"
    ));

    let opts = RenderOptions {
        boxed_text_tag: "aside".to_string(),
        boxed_text_class: String::new(),
        ..RenderOptions::default()
    };
    let html = render_journal_with(&module_journal(), &HashMap::new(), &opts);
    assert!(html.contains("<aside>Read this aloud to the players.</aside>"));
}

#[test]
fn unanchored_entries_are_not_rendered() {
    let html = render_journal(&module_journal(), &media());
    assert!(!html.contains("<figure"));
    assert!(!html.contains(BATTLE_MAP_URL));
}

#[test]
fn media_is_spliced_before_its_anchor() {
    let mut journal = module_journal();
    assert!(journal.reposition_image(BATTLE_MAP, "chapter_2_section_1_content_3"));

    let html = render_journal(&journal, &media());
    let figure = format!(
        "<figure class=\"journal-image\"><img src=\"{BATTLE_MAP_URL}\" alt=\"{BATTLE_MAP}\"/></figure>\n<p>The goblins attack from both sides.</p>"
    );
    assert!(html.contains(&figure), "{html}");
    assert_eq!(html.matches("<figure").count(), 1);
}

#[test]
fn unresolved_keys_are_skipped() {
    let mut journal = module_journal();
    journal.reposition_image(BATTLE_MAP, "chapter_2_section_1_content_1");

    let html = render_journal(&journal, &HashMap::new());
    assert!(!html.contains("<figure"));
    assert!(html.contains("<p>Four goblins hide in the brush.</p>"));
}

#[test]
fn anchors_matching_nothing_are_skipped() {
    let mut journal = module_journal();
    journal.reposition_image(BATTLE_MAP, "chapter_9_content_1");

    let html = render_journal(&journal, &media());
    assert!(!html.contains("<figure"));
}

#[test]
fn entries_on_one_anchor_render_in_key_order() {
    let mut journal = module_journal();
    let anchor = "chapter_1_section_1_content_1";
    for (key, description) in [("z_cover", "Cover"), ("a_portrait", "Portrait")] {
        journal.add_image(
            key,
            ImageMetadata::new("art", "inline", ImageSource::Manual)
                .with_description(description)
                .anchored_before(anchor),
        );
    }
    let media = HashMap::from([
        ("z_cover".to_string(), "z.png".to_string()),
        ("a_portrait".to_string(), "a.png".to_string()),
    ]);

    let html = render_journal(&journal, &media);
    let a = html.find("alt=\"Portrait\"").expect("first figure");
    let z = html.find("alt=\"Cover\"").expect("second figure");
    let text = html.find("<p>This is the intro.</p>").expect("anchor text");
    assert!(a < z && z < text);
}

#[test]
fn image_placeholders_render_nothing_themselves() {
    let html = render_journal(&module_journal(), &media());
    assert!(!html.contains(BATTLE_MAP));
    assert!(html.contains(
        "<p>Four goblins hide in the brush.</p>\n<p>The goblins attack from both sides.</p>"
    ));
}

#[test]
fn structured_payloads_are_plain_text_by_default() {
    let html = render_journal(&module_journal(), &HashMap::new());
    assert!(html.contains("<p>Name | HP<br/>Goblin | 7</p>"));
    assert!(html.contains("<p>d20 for checks<br/>d6 for damage</p>"));
    assert!(html.contains("<p>Trail: Leads to the hideout.</p>"));
    assert!(!html.contains("<table>"));
}

#[test]
fn structured_mode_emits_real_markup() {
    let opts = RenderOptions {
        structured: true,
        ..RenderOptions::default()
    };
    let html = render_journal_with(&module_journal(), &HashMap::new(), &opts);

    assert!(html.contains("<tr><td>Name</td><td>HP</td></tr>"));
    assert!(html.contains("<ul>\n<li>d20 for checks</li>\n<li>d6 for damage</li>\n</ul>"));
    assert!(html.contains("<dt>Trail</dt>\n<dd>Leads to the hideout.</dd>"));
    assert!(html.contains("<pre class=\"stat-block\" data-name=\"Goblin\">"));
    assert!(html.contains("<p>Unknown tags survive as text.</p>"));
}

#[test]
fn text_is_escaped() {
    let journal = Journal::build(common::parse(
        r#"<M><page number="1">
    <chapter_title>Tom &amp; Jerry</chapter_title>
    <paragraph>1 &lt; 2</paragraph>
</page></M>"#,
    ));
    let html = render_journal(&journal, &HashMap::new());
    assert_eq!(html, "<h1>Tom &amp; Jerry</h1>\n<p>1 &lt; 2</p>\n");
}

#[test]
fn unassigned_content_renders_first_when_collected() {
    let source = common::parse(&common::read_fixture("orphans.xml"));
    let (journal, _) = Journal::build_with_options(source, BuildOptions::collecting_orphans());

    let html = render_journal(&journal, &HashMap::new());
    assert!(html.starts_with(
        "<p>Front matter before any chapter.</p>\n<h2>Preface</h2>\n<h3>No section open yet</h3>\n<h1>ONE</h1>"
    ));

    let opts = RenderOptions {
        include_unassigned: false,
        ..RenderOptions::default()
    };
    let html = render_journal_with(&journal, &HashMap::new(), &opts);
    assert!(html.starts_with("<h1>ONE</h1>"));
    assert!(!html.contains("Front matter"));
}
