//! The four-level heading hierarchy content is re-parented into.
//!
//! Every container may hold its own content in addition to child containers;
//! content seen before the first child heading belongs to the parent.

use serde::{Deserialize, Serialize};

use crate::model::{ContentElement, ContentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ContentId,
    pub heading: String,
    pub content: Vec<ContentElement>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: ContentId,
    pub heading: String,
    pub content: Vec<ContentElement>,
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    pub id: ContentId,
    pub heading: String,
    pub content: Vec<ContentElement>,
    pub subsubsections: Vec<Subsubsection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsubsection {
    pub id: ContentId,
    pub heading: String,
    pub content: Vec<ContentElement>,
}

/// Borrowed view of any container, used for uniform traversal.
#[derive(Debug, Clone, Copy)]
pub enum ContainerRef<'a> {
    Chapter(&'a Chapter),
    Section(&'a Section),
    Subsection(&'a Subsection),
    Subsubsection(&'a Subsubsection),
}

impl<'a> ContainerRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            ContainerRef::Chapter(c) => &c.id,
            ContainerRef::Section(c) => &c.id,
            ContainerRef::Subsection(c) => &c.id,
            ContainerRef::Subsubsection(c) => &c.id,
        }
    }

    pub fn heading(&self) -> &'a str {
        match self {
            ContainerRef::Chapter(c) => &c.heading,
            ContainerRef::Section(c) => &c.heading,
            ContainerRef::Subsection(c) => &c.heading,
            ContainerRef::Subsubsection(c) => &c.heading,
        }
    }

    pub fn content(&self) -> &'a [ContentElement] {
        match self {
            ContainerRef::Chapter(c) => &c.content,
            ContainerRef::Section(c) => &c.content,
            ContainerRef::Subsection(c) => &c.content,
            ContainerRef::Subsubsection(c) => &c.content,
        }
    }

    /// 1 for chapters through 4 for subsubsections.
    pub fn depth(&self) -> u8 {
        match self {
            ContainerRef::Chapter(_) => 1,
            ContainerRef::Section(_) => 2,
            ContainerRef::Subsection(_) => 3,
            ContainerRef::Subsubsection(_) => 4,
        }
    }

    pub fn children(&self) -> Vec<ContainerRef<'a>> {
        match self {
            ContainerRef::Chapter(c) => c.sections.iter().map(ContainerRef::Section).collect(),
            ContainerRef::Section(c) => c
                .subsections
                .iter()
                .map(ContainerRef::Subsection)
                .collect(),
            ContainerRef::Subsection(c) => c
                .subsubsections
                .iter()
                .map(ContainerRef::Subsubsection)
                .collect(),
            ContainerRef::Subsubsection(_) => Vec::new(),
        }
    }
}

/// Pre-order walk over a chapter list: each container before its children.
pub fn walk_containers(chapters: &[Chapter]) -> Vec<ContainerRef<'_>> {
    fn visit<'a>(node: ContainerRef<'a>, out: &mut Vec<ContainerRef<'a>>) {
        out.push(node);
        for child in node.children() {
            visit(child, out);
        }
    }

    let mut out = Vec::new();
    for c in chapters {
        visit(ContainerRef::Chapter(c), &mut out);
    }
    out
}
