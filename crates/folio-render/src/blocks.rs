//! Per-element rendering: the extension point for structured content.

use folio_core::model::{ContentData, ContentElement, ContentType};

use crate::escape::{escape_html, escape_multiline};
use crate::options::RenderOptions;

/// Renders one content element (media splicing is handled by the caller).
pub trait BlockRenderer {
    fn render_block(&self, element: &ContentElement, opts: &RenderOptions, out: &mut String);
}

/// Minimal rendering: every payload becomes text in a paragraph wrapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBlocks;

/// Tables, lists, definition lists and stat blocks as real markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredBlocks;

impl BlockRenderer for PlainBlocks {
    fn render_block(&self, element: &ContentElement, opts: &RenderOptions, out: &mut String) {
        match &element.data {
            // Placeholders are anchors only.
            ContentData::ImageRef(_) => {}
            ContentData::Text(text) => text_block(&element.content_type, text, opts, out),
            other => {
                let text = other.plain_text();
                let text = text.trim();
                if !text.is_empty() {
                    wrap(&opts.paragraph_tag, "", &escape_multiline(text), out);
                }
            }
        }
    }
}

impl BlockRenderer for StructuredBlocks {
    fn render_block(&self, element: &ContentElement, opts: &RenderOptions, out: &mut String) {
        match &element.data {
            ContentData::ImageRef(_) => {}
            ContentData::Text(text) => text_block(&element.content_type, text, opts, out),
            ContentData::Table(table) => {
                out.push_str("<table>\n");
                for row in &table.rows {
                    out.push_str("<tr>");
                    for cell in &row.cells {
                        out.push_str("<td>");
                        out.push_str(&escape_html(cell));
                        out.push_str("</td>");
                    }
                    out.push_str("</tr>\n");
                }
                out.push_str("</table>\n");
            }
            ContentData::List(list) => {
                out.push_str("<ul>\n");
                for item in &list.items {
                    wrap("li", "", &escape_html(item), out);
                }
                out.push_str("</ul>\n");
            }
            ContentData::DefinitionList(dl) => {
                out.push_str("<dl>\n");
                for item in &dl.items {
                    wrap("dt", "", &escape_html(&item.term), out);
                    wrap("dd", "", &escape_html(&item.definition), out);
                }
                out.push_str("</dl>\n");
            }
            ContentData::StatBlock(block) => {
                out.push_str(&format!(
                    "<pre class=\"stat-block\" data-name=\"{}\">{}</pre>\n",
                    escape_html(&block.name),
                    escape_html(block.text.trim())
                ));
            }
        }
    }
}

fn text_block(content_type: &ContentType, text: &str, opts: &RenderOptions, out: &mut String) {
    let body = escape_multiline(text);
    // Headings only reach here from the unassigned bucket.
    if let Some(level) = content_type.heading_level() {
        return wrap(&format!("h{}", level + 1), "", &body, out);
    }
    match content_type {
        ContentType::BoxedText => wrap(&opts.boxed_text_tag, &opts.boxed_text_class, &body, out),
        _ => wrap(&opts.paragraph_tag, "", &body, out),
    }
}

fn wrap(tag: &str, class: &str, body: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    if !class.is_empty() {
        out.push_str(" class=\"");
        out.push_str(&escape_html(class));
        out.push('"');
    }
    out.push('>');
    out.push_str(body);
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}
