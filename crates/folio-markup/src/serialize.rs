//! Inverse of the parser: emits the same tag vocabulary it consumes.
//!
//! Round-trip contract: `parse_document(&to_string(&d)) == d` for every `d`
//! the parser can produce.

use folio_core::model::{ContentData, ContentElement, Page, XMLDocument};

use crate::escape::escape_xml;
use crate::parse::UNKNOWN_STAT_BLOCK_NAME;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Root tag used when a document has an empty title.
pub const FALLBACK_ROOT_TAG: &str = "document";

/// Serialize with two-space indentation, one element per line.
pub fn to_string(doc: &XMLDocument) -> String {
    MarkupWriter::new(Some("  ")).document(doc)
}

/// Serialize without indentation or line breaks between elements.
pub fn to_string_compact(doc: &XMLDocument) -> String {
    MarkupWriter::new(None).document(doc)
}

struct MarkupWriter {
    indent: Option<&'static str>,
    out: String,
}

impl MarkupWriter {
    fn new(indent: Option<&'static str>) -> Self {
        Self {
            indent,
            out: String::new(),
        }
    }

    fn document(mut self, doc: &XMLDocument) -> String {
        let root = if doc.title.is_empty() {
            FALLBACK_ROOT_TAG
        } else {
            doc.title.as_str()
        };

        self.line(0, XML_DECLARATION);
        if doc.pages.is_empty() {
            self.line(0, &format!("<{root}/>"));
        } else {
            self.line(0, &format!("<{root}>"));
            for page in &doc.pages {
                self.page(page);
            }
            self.line(0, &format!("</{root}>"));
        }
        self.out
    }

    fn line(&mut self, depth: usize, s: &str) {
        if let Some(unit) = self.indent {
            for _ in 0..depth {
                self.out.push_str(unit);
            }
            self.out.push_str(s);
            self.out.push('\n');
        } else {
            self.out.push_str(s);
        }
    }

    fn page(&mut self, page: &Page) {
        if page.content.is_empty() {
            self.line(1, &format!(r#"<page number="{}"/>"#, page.number));
            return;
        }
        self.line(1, &format!(r#"<page number="{}">"#, page.number));
        for element in &page.content {
            self.content(element);
        }
        self.line(1, "</page>");
    }

    fn content(&mut self, element: &ContentElement) {
        let tag = element.content_type.as_tag();
        match &element.data {
            ContentData::Text(text) => self.leaf(2, tag, text),
            ContentData::Table(table) => {
                if table.rows.is_empty() {
                    self.line(2, &format!("<{tag}/>"));
                    return;
                }
                self.line(2, &format!("<{tag}>"));
                for row in &table.rows {
                    if row.cells.is_empty() {
                        self.line(3, "<row/>");
                        continue;
                    }
                    self.line(3, "<row>");
                    for cell in &row.cells {
                        self.leaf(4, "cell", cell);
                    }
                    self.line(3, "</row>");
                }
                self.line(2, &format!("</{tag}>"));
            }
            ContentData::List(list) => {
                if list.items.is_empty() {
                    self.line(2, &format!("<{tag}/>"));
                    return;
                }
                self.line(2, &format!("<{tag}>"));
                for item in &list.items {
                    self.leaf(3, "item", item);
                }
                self.line(2, &format!("</{tag}>"));
            }
            ContentData::DefinitionList(dl) => {
                if dl.items.is_empty() {
                    self.line(2, &format!("<{tag}/>"));
                    return;
                }
                self.line(2, &format!("<{tag}>"));
                for item in &dl.items {
                    self.line(3, "<definition_item>");
                    self.leaf(4, "term", &item.term);
                    self.leaf(4, "definition", &item.definition);
                    self.line(3, "</definition_item>");
                }
                self.line(2, &format!("</{tag}>"));
            }
            ContentData::StatBlock(block) => {
                if block.raw.is_empty() {
                    let name = if block.name.is_empty() {
                        UNKNOWN_STAT_BLOCK_NAME
                    } else {
                        block.name.as_str()
                    };
                    self.line(2, &format!(r#"<{tag} name="{}"/>"#, escape_xml(name)));
                } else {
                    // Exact source bytes; never re-indented.
                    self.line(2, &block.raw);
                }
            }
            ContentData::ImageRef(key) => {
                self.line(2, &format!(r#"<{tag} key="{}"/>"#, escape_xml(key)));
            }
        }
    }

    fn leaf(&mut self, depth: usize, tag: &str, text: &str) {
        if text.is_empty() {
            self.line(depth, &format!("<{tag}/>"));
        } else {
            self.line(depth, &format!("<{tag}>{}</{tag}>", escape_xml(text)));
        }
    }
}
