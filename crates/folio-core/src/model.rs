use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hash::{RecordHasher, xxh3_canon_hex};

/// A stable identifier for a content element or container.
pub type ContentId = String;

/// Tag of a content element, as it appeared in the extracted markup.
///
/// Recognised tags get their own variant. Anything else is kept verbatim in
/// `Other` so the original element name survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    ChapterTitle,
    Section,
    Subsection,
    Subsubsection,
    Paragraph,
    BoxedText,
    Table,
    List,
    DefinitionList,
    StatBlock,
    ImageRef,
    Other(String),
}

impl ContentType {
    pub fn as_tag(&self) -> &str {
        match self {
            ContentType::ChapterTitle => "chapter_title",
            ContentType::Section => "section",
            ContentType::Subsection => "subsection",
            ContentType::Subsubsection => "subsubsection",
            ContentType::Paragraph => "paragraph",
            ContentType::BoxedText => "boxed_text",
            ContentType::Table => "table",
            ContentType::List => "list",
            ContentType::DefinitionList => "definition_list",
            ContentType::StatBlock => "stat_block",
            ContentType::ImageRef => "image_ref",
            ContentType::Other(tag) => tag.as_str(),
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "chapter_title" => ContentType::ChapterTitle,
            "section" => ContentType::Section,
            "subsection" => ContentType::Subsection,
            "subsubsection" => ContentType::Subsubsection,
            "paragraph" => ContentType::Paragraph,
            "boxed_text" => ContentType::BoxedText,
            "table" => ContentType::Table,
            "list" => ContentType::List,
            "definition_list" => ContentType::DefinitionList,
            "stat_block" => ContentType::StatBlock,
            "image_ref" => ContentType::ImageRef,
            other => ContentType::Other(other.to_string()),
        }
    }

    /// Depth in the heading hierarchy: 0 = chapter title, 3 = subsubsection.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ContentType::ChapterTitle => Some(0),
            ContentType::Section => Some(1),
            ContentType::Subsection => Some(2),
            ContentType::Subsubsection => Some(3),
            _ => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    pub fn is_recognised(&self) -> bool {
        !matches!(self, ContentType::Other(_))
    }
}

impl From<String> for ContentType {
    fn from(tag: String) -> Self {
        match ContentType::from_tag(&tag) {
            ContentType::Other(_) => ContentType::Other(tag),
            known => known,
        }
    }
}

impl From<ContentType> for String {
    fn from(t: ContentType) -> Self {
        match t {
            ContentType::Other(tag) => tag,
            known => known.as_tag().to_string(),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Ordered rows of ordered cells. Rows may have differing widths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItems {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionItem {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionList {
    pub items: Vec<DefinitionItem>,
}

/// A raw block whose schema is defined outside this crate.
///
/// `raw` holds the exact source bytes of the element, opening tag included,
/// so it can be re-emitted unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub name: String,
    pub raw: String,
    /// Concatenated text content of `raw`.
    #[serde(default)]
    pub text: String,
}

/// Type-specific payload of a content element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContentData {
    Text(String),
    Table(Table),
    List(ListItems),
    DefinitionList(DefinitionList),
    StatBlock(StatBlock),
    /// Opaque media key; the element itself only marks a position.
    ImageRef(String),
}

impl ContentData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentData::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Best-effort plain-text rendition of any payload.
    pub fn plain_text(&self) -> String {
        match self {
            ContentData::Text(s) => s.clone(),
            ContentData::Table(t) => t
                .rows
                .iter()
                .map(|r| r.cells.join(" | "))
                .collect::<Vec<_>>()
                .join("\n"),
            ContentData::List(l) => l.items.join("\n"),
            ContentData::DefinitionList(d) => d
                .items
                .iter()
                .map(|i| format!("{}: {}", i.term, i.definition))
                .collect::<Vec<_>>()
                .join("\n"),
            ContentData::StatBlock(s) => s.text.clone(),
            ContentData::ImageRef(_) => String::new(),
        }
    }

    /// Payload text fed into content fingerprints.
    ///
    /// Unlike `plain_text`, this keeps structure markers so that e.g. a table
    /// and a paragraph with the same text do not collide.
    fn fingerprint_payload(&self) -> String {
        match self {
            ContentData::Text(s) => format!("text\u{1f}{s}"),
            ContentData::Table(t) => {
                let mut out = String::from("table");
                for r in &t.rows {
                    out.push('\u{1e}');
                    out.push_str(&r.cells.join("\u{1f}"));
                }
                out
            }
            ContentData::List(l) => format!("list\u{1e}{}", l.items.join("\u{1f}")),
            ContentData::DefinitionList(d) => {
                let mut out = String::from("dl");
                for i in &d.items {
                    out.push('\u{1e}');
                    out.push_str(&i.term);
                    out.push('\u{1f}');
                    out.push_str(&i.definition);
                }
                out
            }
            ContentData::StatBlock(s) => format!("stat\u{1f}{}\u{1f}{}", s.name, s.raw),
            ContentData::ImageRef(k) => format!("image\u{1f}{k}"),
        }
    }
}

/// Atomic unit of extracted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentElement {
    pub id: ContentId,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub data: ContentData,
}

impl ContentElement {
    pub fn new(id: impl Into<ContentId>, content_type: ContentType, data: ContentData) -> Self {
        Self {
            id: id.into(),
            content_type,
            data,
        }
    }

    /// Plain-text element whose type is taken from a tag name.
    pub fn text(id: impl Into<ContentId>, tag: &str, text: impl Into<String>) -> Self {
        Self::new(id, ContentType::from_tag(tag), ContentData::Text(text.into()))
    }

    pub fn image_key(&self) -> Option<&str> {
        match &self.data {
            ContentData::ImageRef(k) => Some(k),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Positive page number from the extraction pass.
    pub number: u32,
    pub content: Vec<ContentElement>,
}

/// Structural record of an extraction, page by page.
///
/// Pages keep extraction order, which is not necessarily `number` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XMLDocument {
    pub title: String,
    pub pages: Vec<Page>,
}

impl XMLDocument {
    pub fn new(title: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            title: title.into(),
            pages,
        }
    }

    /// First page carrying `number`, in extraction order.
    pub fn page(&self, number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// All content elements in stream order.
    pub fn elements(&self) -> impl Iterator<Item = (&Page, &ContentElement)> {
        self.pages
            .iter()
            .flat_map(|p| p.content.iter().map(move |c| (p, c)))
    }

    pub fn content_count(&self) -> usize {
        self.pages.iter().map(|p| p.content.len()).sum()
    }

    pub fn non_heading_count(&self) -> usize {
        self.elements()
            .filter(|(_, c)| !c.content_type.is_heading())
            .count()
    }

    /// Deterministic content fingerprint (16 hex chars).
    ///
    /// Hash input is the title line, then for every page a `#{page}` line
    /// followed by `{id}\t{type}\t{payloadHash}\n` per element.
    pub fn fingerprint(&self) -> String {
        let mut hasher = RecordHasher::new();
        hasher.record(&[self.title.as_str()]);
        for page in &self.pages {
            hasher.record(&[format!("#{}", page.number).as_str()]);
            for c in &page.content {
                let payload_hash = xxh3_canon_hex(&c.data.fingerprint_payload());
                hasher.record(&[c.id.as_str(), c.content_type.as_tag(), payload_hash.as_str()]);
            }
        }
        hasher.finish_hex()
    }
}
