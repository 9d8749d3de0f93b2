//! Owned element tree built from the `quick-xml` event stream.
//!
//! Each element remembers the byte span it occupies in the input so raw
//! blocks can be re-emitted byte for byte.

use std::ops::Range;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use folio_core::error::{MarkupError, MarkupResult};

use crate::escape::resolve_entity;

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Byte range from `<` of the start tag to `>` of the end tag.
    pub span: Range<usize>,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    pub fn first_named(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Concatenated text of all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Non-whitespace text placed directly inside this element.
    pub fn has_stray_text(&self) -> bool {
        self.children
            .iter()
            .any(|n| matches!(n, Node::Text(t) if !t.trim().is_empty()))
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(e, out),
        }
    }
}

fn utf8(bytes: &[u8], position: u64) -> MarkupResult<&str> {
    std::str::from_utf8(bytes)
        .map_err(|e| MarkupError::malformed_at(format!("invalid UTF-8: {e}"), position))
}

fn open_element(e: &BytesStart<'_>, start: usize) -> MarkupResult<Element> {
    let position = start as u64;
    let name = e.name();
    let name = utf8(name.as_ref(), position)?.to_string();

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| MarkupError::malformed_at(err.to_string(), position))?;
        let key = utf8(attr.key.as_ref(), position)?.to_string();
        let raw = utf8(attr.value.as_ref(), position)?;
        let value = unescape(raw)
            .map_err(|err| MarkupError::malformed_at(format!("attribute '{key}': {err}"), position))?;
        attrs.push((key, value.into_owned()));
    }

    Ok(Element {
        name,
        attrs,
        children: Vec::new(),
        span: start..start,
    })
}

fn push_text(stack: &mut [Element], text: &str, position: u64) -> MarkupResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            // Adjacent text and entity events merge into one node.
            if let Some(Node::Text(prev)) = parent.children.last_mut() {
                prev.push_str(text);
            } else {
                parent.children.push(Node::Text(text.to_string()));
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(MarkupError::malformed_at(
            "text outside of the root element",
            position,
        )),
    }
}

fn close_element(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    el: Element,
) -> MarkupResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(el));
        return Ok(());
    }
    if root.is_some() {
        return Err(MarkupError::malformed_at(
            "more than one root element",
            el.span.start as u64,
        ));
    }
    *root = Some(el);
    Ok(())
}

/// Parse `input` into an element tree rooted at its single root element.
pub(crate) fn read_tree(input: &str) -> MarkupResult<Element> {
    let mut reader = Reader::from_str(input);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            MarkupError::malformed_at(e.to_string(), reader.error_position() as u64)
        })?;
        let position = start as u64;

        match event {
            Event::Start(e) => {
                stack.push(open_element(&e, start)?);
            }
            Event::Empty(e) => {
                let mut el = open_element(&e, start)?;
                el.span.end = reader.buffer_position() as usize;
                close_element(&mut stack, &mut root, el)?;
            }
            Event::End(e) => {
                let mut el = stack.pop().ok_or_else(|| {
                    MarkupError::unbalanced_markup("unexpected closing tag", position)
                })?;
                if e.name().as_ref() != el.name.as_bytes() {
                    return Err(MarkupError::unbalanced_markup(
                        format_args!("closing tag does not match <{}>", el.name),
                        position,
                    ));
                }
                el.span.end = reader.buffer_position() as usize;
                close_element(&mut stack, &mut root, el)?;
            }
            Event::Text(t) => {
                push_text(&mut stack, utf8(t.as_ref(), position)?, position)?;
            }
            Event::CData(t) => {
                push_text(&mut stack, utf8(t.as_ref(), position)?, position)?;
            }
            Event::GeneralRef(r) => {
                let name = utf8(r.as_ref(), position)?;
                let c = resolve_entity(name).ok_or_else(|| {
                    MarkupError::malformed_at(format!("unknown entity '&{name};'"), position)
                })?;
                push_text(&mut stack, c.encode_utf8(&mut [0u8; 4]), position)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(MarkupError::unbalanced_markup(
            format_args!("unclosed element <{}>", open.name),
            open.span.start as u64,
        ));
    }

    root.ok_or_else(MarkupError::no_root_element)
}
