use tracing::{debug, info, instrument, warn};

use folio_core::error::{MarkupError, MarkupResult};
use folio_core::model::{
    ContentData, ContentElement, ContentType, DefinitionItem, DefinitionList, ListItems, Page,
    StatBlock, Table, TableRow, XMLDocument,
};

use crate::tree::{Element, read_tree};

/// Default `name` of a stat block without one.
pub const UNKNOWN_STAT_BLOCK_NAME: &str = "Unknown";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// An element tag the parser does not recognise, kept as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognisedTag {
    pub page: u32,
    pub content_id: String,
    pub tag: String,
}

/// A parsed document together with the degradations observed while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub document: XMLDocument,
    pub unrecognised: Vec<UnrecognisedTag>,
}

/// Parse page-indexed markup into an [`XMLDocument`].
///
/// The root element's tag becomes the title. Fails with
/// `MalformedDocument` on unparsable markup or a page without a positive
/// integer `number`.
pub fn parse_document(input: &str) -> MarkupResult<XMLDocument> {
    parse_document_with_report(input).map(|o| o.document)
}

#[instrument(level = "debug", skip(input), fields(input_len = input.len()))]
pub fn parse_document_with_report(input: &str) -> MarkupResult<ParseOutcome> {
    // Spans are offsets into the BOM-less text; slice that same text.
    let input = input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input);
    let root = read_tree(input)?;

    let mut pages = Vec::new();
    let mut unrecognised = Vec::new();

    for child in root.elements() {
        if child.name != "page" {
            warn!(tag = %child.name, "skipping non-page child of the root element");
            continue;
        }
        let page = parse_page(input, pages.len(), child, &mut unrecognised)?;
        pages.push(page);
    }

    let document = XMLDocument::new(root.name.clone(), pages);
    info!(
        title = %document.title,
        pages = document.pages.len(),
        elements = document.content_count(),
        unrecognised = unrecognised.len(),
        "parsed document"
    );

    Ok(ParseOutcome {
        document,
        unrecognised,
    })
}

fn parse_page_number(page_index: usize, el: &Element) -> MarkupResult<u32> {
    let raw = el
        .attr("number")
        .ok_or_else(|| MarkupError::missing_page_number(page_index))?;
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(MarkupError::zero_page_number(page_index)),
        Ok(n) => Ok(n),
        Err(_) => Err(MarkupError::invalid_page_number(page_index, raw)),
    }
}

fn parse_page(
    input: &str,
    page_index: usize,
    el: &Element,
    unrecognised: &mut Vec<UnrecognisedTag>,
) -> MarkupResult<Page> {
    let number = parse_page_number(page_index, el)?;
    if el.has_stray_text() {
        debug!(page = number, "ignoring text placed directly inside a page");
    }

    let mut content = Vec::new();
    for (index, child) in el.elements().enumerate() {
        let id = format!("page_{number}_content_{index}");
        let element = parse_content(input, id, child)?;
        if !element.content_type.is_recognised() {
            debug!(page = number, tag = %child.name, "unknown tag degraded to text");
            unrecognised.push(UnrecognisedTag {
                page: number,
                content_id: element.id.clone(),
                tag: child.name.clone(),
            });
        }
        content.push(element);
    }

    Ok(Page { number, content })
}

fn parse_content(input: &str, id: String, el: &Element) -> MarkupResult<ContentElement> {
    let content_type = ContentType::from_tag(&el.name);

    let data = match content_type {
        ContentType::Table => ContentData::Table(Table {
            rows: el
                .elements_named("row")
                .map(|row| TableRow {
                    cells: row.elements_named("cell").map(Element::text_content).collect(),
                })
                .collect(),
        }),
        ContentType::List => ContentData::List(ListItems {
            items: el.elements_named("item").map(Element::text_content).collect(),
        }),
        ContentType::DefinitionList => ContentData::DefinitionList(DefinitionList {
            items: el
                .elements_named("definition_item")
                .map(|item| DefinitionItem {
                    term: child_text(item, "term"),
                    definition: child_text(item, "definition"),
                })
                .collect(),
        }),
        ContentType::StatBlock => ContentData::StatBlock(StatBlock {
            name: el
                .attr("name")
                .unwrap_or(UNKNOWN_STAT_BLOCK_NAME)
                .to_string(),
            raw: source_slice(input, el)?.to_string(),
            text: el.text_content(),
        }),
        ContentType::ImageRef => {
            ContentData::ImageRef(el.attr("key").unwrap_or_default().to_string())
        }
        _ => ContentData::Text(el.text_content()),
    };

    Ok(ContentElement::new(id, content_type, data))
}

/// Exact source text of `el`.
fn source_slice<'a>(input: &'a str, el: &Element) -> MarkupResult<&'a str> {
    input.get(el.span.clone()).ok_or_else(|| {
        MarkupError::malformed_at(
            format!("<{}> spans bytes {:?} outside the input", el.name, el.span),
            el.span.start as u64,
        )
    })
}

fn child_text(el: &Element, name: &str) -> String {
    el.first_named(name)
        .map(Element::text_content)
        .unwrap_or_default()
}
