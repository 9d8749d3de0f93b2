//! Recursive-descent rendering of a journal with media splicing.

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use folio_core::model::ContentElement;
use folio_core::outline::ContainerRef;
use folio_journal::{ImageRegistry, Journal};

use crate::blocks::{BlockRenderer, PlainBlocks, StructuredBlocks};
use crate::escape::escape_html;
use crate::options::RenderOptions;

/// Render with default options.
///
/// `media` maps registry keys to displayable references (URLs, paths).
/// Entries whose key is missing from `media` are skipped.
pub fn render_journal(journal: &Journal, media: &HashMap<String, String>) -> String {
    render_journal_with(journal, media, &RenderOptions::default())
}

/// Render with explicit options; `opts.structured` picks the block renderer.
pub fn render_journal_with(
    journal: &Journal,
    media: &HashMap<String, String>,
    opts: &RenderOptions,
) -> String {
    if opts.structured {
        render_journal_using(journal, media, opts, &StructuredBlocks)
    } else {
        render_journal_using(journal, media, opts, &PlainBlocks)
    }
}

/// Render with a caller-supplied block renderer.
#[instrument(level = "debug", skip_all, fields(title = %journal.title()))]
pub fn render_journal_using<B: BlockRenderer + ?Sized>(
    journal: &Journal,
    media: &HashMap<String, String>,
    opts: &RenderOptions,
    blocks: &B,
) -> String {
    let mut ctx = RenderContext {
        anchors: AnchorIndex::build(journal.image_registry(), media),
        opts,
        blocks,
        out: String::new(),
        figures: 0,
    };

    if opts.include_unassigned {
        ctx.render_content(journal.unassigned());
    }
    for chapter in journal.chapters() {
        ctx.render_container(ContainerRef::Chapter(chapter));
    }

    debug!(bytes = ctx.out.len(), figures = ctx.figures, "rendered journal");
    ctx.out
}

/// A resolved media entry ready to be emitted.
struct Figure<'a> {
    src: &'a str,
    alt: &'a str,
}

/// content id → figures, in registry key order.
struct AnchorIndex<'a> {
    by_anchor: HashMap<&'a str, Vec<Figure<'a>>>,
}

impl<'a> AnchorIndex<'a> {
    fn build(registry: &'a ImageRegistry, media: &'a HashMap<String, String>) -> Self {
        let mut by_anchor: HashMap<&'a str, Vec<Figure<'a>>> = HashMap::new();
        for (key, metadata) in registry.iter() {
            let Some(anchor) = metadata.insert_before_content_id.as_deref() else {
                continue;
            };
            let Some(src) = media.get(key) else {
                trace!(key, "no media reference for key");
                continue;
            };
            let alt = metadata.description.as_deref().unwrap_or(key);
            by_anchor.entry(anchor).or_default().push(Figure { src, alt });
        }
        Self { by_anchor }
    }

    fn before(&self, content_id: &str) -> &[Figure<'a>] {
        self.by_anchor.get(content_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

struct RenderContext<'a, B: ?Sized> {
    anchors: AnchorIndex<'a>,
    opts: &'a RenderOptions,
    blocks: &'a B,
    out: String,
    figures: usize,
}

impl<B: BlockRenderer + ?Sized> RenderContext<'_, B> {
    fn render_container(&mut self, container: ContainerRef<'_>) {
        let heading = container.heading();
        if !heading.is_empty() {
            let level = container.depth();
            self.out
                .push_str(&format!("<h{level}>{}</h{level}>\n", escape_html(heading)));
        }
        self.render_content(container.content());
        for child in container.children() {
            self.render_container(child);
        }
    }

    fn render_content(&mut self, content: &[ContentElement]) {
        for element in content {
            for figure in self.anchors.before(&element.id) {
                self.out.push_str(&format!(
                    "<figure class=\"{}\"><img src=\"{}\" alt=\"{}\"/></figure>\n",
                    escape_html(&self.opts.image_class),
                    escape_html(figure.src),
                    escape_html(figure.alt)
                ));
                self.figures += 1;
            }
            self.blocks.render_block(element, self.opts, &mut self.out);
        }
    }
}
