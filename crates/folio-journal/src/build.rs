//! Single-pass flattening of the page stream into the heading hierarchy.
//!
//! Ids are re-stamped from page-relative (`page_3_content_2`) to
//! heading-path-relative (`chapter_1_section_2_content_1`). Container and
//! content counters are 1-based in ids.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use folio_core::model::{ContentElement, ContentType, XMLDocument};
use folio_core::outline::{Chapter, Section, Subsection, Subsubsection};

use crate::diagnostics::{BuildDiagnostic, DiagnosticCode};
use crate::report::BuildReport;

/// What to do with elements seen before an enclosing container exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Drop them. Still reported through diagnostics.
    #[default]
    Drop,
    /// Keep them, in stream order, in `Journal::unassigned`.
    Collect,
}

/// Hierarchy builder configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub orphan_policy: OrphanPolicy,
}

impl BuildOptions {
    pub fn collecting_orphans() -> Self {
        Self {
            orphan_policy: OrphanPolicy::Collect,
        }
    }
}

/// Output of a build: the chapter tree plus any collected orphans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    pub chapters: Vec<Chapter>,
    pub unassigned: Vec<ContentElement>,
}

/// Deepest open container level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Chapter,
    Section,
    Subsection,
    Subsubsection,
}

/// Id prefix for elements kept in the unassigned bucket.
pub const UNASSIGNED_PREFIX: &str = "unassigned";

/// Flatten `doc` into chapters, visiting pages in extraction order.
#[instrument(level = "debug", skip_all, fields(title = %doc.title, pages = doc.pages.len()))]
pub fn build_hierarchy(doc: &XMLDocument, opts: BuildOptions) -> (Hierarchy, BuildReport) {
    let mut builder = HierarchyBuilder::new(opts);
    for page in &doc.pages {
        for element in &page.content {
            builder.visit(page.number, element);
        }
    }
    builder.finish()
}

struct HierarchyBuilder {
    opts: BuildOptions,
    out: Hierarchy,
    report: BuildReport,
    open: Option<Level>,
    chapter_idx: usize,
    section_idx: usize,
    subsection_idx: usize,
    subsubsection_idx: usize,
    content_idx: usize,
}

impl HierarchyBuilder {
    fn new(opts: BuildOptions) -> Self {
        Self {
            opts,
            out: Hierarchy::default(),
            report: BuildReport::default(),
            open: None,
            chapter_idx: 0,
            section_idx: 0,
            subsection_idx: 0,
            subsubsection_idx: 0,
            content_idx: 0,
        }
    }

    fn finish(self) -> (Hierarchy, BuildReport) {
        let report = self.report;
        info!(
            chapters = report.chapters,
            sections = report.sections,
            placed = report.placed_content,
            dropped = report.dropped_count(),
            unassigned = report.unassigned,
            "built hierarchy"
        );
        (self.out, report)
    }

    fn visit(&mut self, page: u32, element: &ContentElement) {
        match element.content_type {
            ContentType::ChapterTitle => self.open_chapter(element),
            ContentType::Section => self.open_section(page, element),
            ContentType::Subsection => self.open_subsection(page, element),
            ContentType::Subsubsection => self.open_subsubsection(page, element),
            _ => self.place(page, element),
        }
    }

    fn open_chapter(&mut self, element: &ContentElement) {
        self.chapter_idx += 1;
        self.out.chapters.push(Chapter {
            id: format!("chapter_{}", self.chapter_idx),
            heading: heading_text(element),
            content: Vec::new(),
            sections: Vec::new(),
        });
        self.section_idx = 0;
        self.subsection_idx = 0;
        self.subsubsection_idx = 0;
        self.content_idx = 0;
        self.open = Some(Level::Chapter);
        self.report.chapters += 1;
    }

    fn open_section(&mut self, page: u32, element: &ContentElement) {
        let Some(chapter) = self.out.chapters.last_mut().filter(|_| self.open.is_some()) else {
            return self.orphan(page, element, DiagnosticCode::OrphanHeadingDropped);
        };
        self.section_idx += 1;
        chapter.sections.push(Section {
            id: format!("{}_section_{}", chapter.id, self.section_idx),
            heading: heading_text(element),
            content: Vec::new(),
            subsections: Vec::new(),
        });
        self.subsection_idx = 0;
        self.subsubsection_idx = 0;
        self.content_idx = 0;
        self.open = Some(Level::Section);
        self.report.sections += 1;
    }

    fn open_subsection(&mut self, page: u32, element: &ContentElement) {
        let section = match self.open {
            Some(level) if level >= Level::Section => self
                .out
                .chapters
                .last_mut()
                .and_then(|c| c.sections.last_mut()),
            _ => None,
        };
        let Some(section) = section else {
            return self.orphan(page, element, DiagnosticCode::OrphanHeadingDropped);
        };
        self.subsection_idx += 1;
        section.subsections.push(Subsection {
            id: format!("{}_subsection_{}", section.id, self.subsection_idx),
            heading: heading_text(element),
            content: Vec::new(),
            subsubsections: Vec::new(),
        });
        self.subsubsection_idx = 0;
        self.content_idx = 0;
        self.open = Some(Level::Subsection);
        self.report.subsections += 1;
    }

    fn open_subsubsection(&mut self, page: u32, element: &ContentElement) {
        let subsection = match self.open {
            Some(level) if level >= Level::Subsection => self
                .out
                .chapters
                .last_mut()
                .and_then(|c| c.sections.last_mut())
                .and_then(|s| s.subsections.last_mut()),
            _ => None,
        };
        let Some(subsection) = subsection else {
            return self.orphan(page, element, DiagnosticCode::OrphanHeadingDropped);
        };
        self.subsubsection_idx += 1;
        subsection.subsubsections.push(Subsubsection {
            id: format!("{}_subsubsection_{}", subsection.id, self.subsubsection_idx),
            heading: heading_text(element),
            content: Vec::new(),
        });
        self.content_idx = 0;
        self.open = Some(Level::Subsubsection);
        self.report.subsubsections += 1;
    }

    /// Append non-heading content to the deepest open container.
    fn place(&mut self, page: u32, element: &ContentElement) {
        if !element.content_type.is_recognised() {
            self.diagnose(
                DiagnosticCode::UnknownTagDegraded,
                page,
                element,
                format!("unrecognised tag '{}' kept as text", element.content_type),
            );
        }

        let next = self.content_idx + 1;
        let Some((container_id, content)) = self.deepest_open() else {
            return self.orphan(page, element, DiagnosticCode::OrphanContentDropped);
        };

        let id = format!("{container_id}_content_{next}");
        debug!(from = %element.id, to = %id, "placing content");
        content.push(ContentElement {
            id,
            content_type: element.content_type.clone(),
            data: element.data.clone(),
        });
        self.content_idx = next;
        self.report.placed_content += 1;
    }

    fn deepest_open(&mut self) -> Option<(&str, &mut Vec<ContentElement>)> {
        let level = self.open?;
        let chapter = self.out.chapters.last_mut()?;
        if level == Level::Chapter {
            return Some((chapter.id.as_str(), &mut chapter.content));
        }
        let section = chapter.sections.last_mut()?;
        if level == Level::Section {
            return Some((section.id.as_str(), &mut section.content));
        }
        let subsection = section.subsections.last_mut()?;
        if level == Level::Subsection {
            return Some((subsection.id.as_str(), &mut subsection.content));
        }
        let subsubsection = subsection.subsubsections.last_mut()?;
        Some((subsubsection.id.as_str(), &mut subsubsection.content))
    }

    fn orphan(&mut self, page: u32, element: &ContentElement, dropped_as: DiagnosticCode) {
        match self.opts.orphan_policy {
            OrphanPolicy::Drop => {
                warn!(
                    page,
                    id = %element.id,
                    kind = %element.content_type,
                    "no enclosing container; element dropped"
                );
                self.diagnose(
                    dropped_as,
                    page,
                    element,
                    "no enclosing container is open".to_string(),
                );
            }
            OrphanPolicy::Collect => {
                let id = format!("{UNASSIGNED_PREFIX}_content_{}", self.out.unassigned.len() + 1);
                debug!(page, from = %element.id, to = %id, "collecting orphan");
                self.out.unassigned.push(ContentElement {
                    id,
                    content_type: element.content_type.clone(),
                    data: element.data.clone(),
                });
                self.report.unassigned += 1;
                let code = if element.content_type.is_heading() {
                    DiagnosticCode::OrphanHeadingCollected
                } else {
                    DiagnosticCode::OrphanContentCollected
                };
                self.diagnose(
                    code,
                    page,
                    element,
                    "no enclosing container is open; kept as unassigned".to_string(),
                );
            }
        }
    }

    fn diagnose(&mut self, code: DiagnosticCode, page: u32, element: &ContentElement, message: String) {
        self.report.diagnostics.push(BuildDiagnostic {
            code,
            page,
            source_id: element.id.clone(),
            content_type: element.content_type.to_string(),
            message,
        });
    }
}

fn heading_text(element: &ContentElement) -> String {
    element.data.as_text().unwrap_or_default().to_string()
}
