//! `folio-io` is the single supported public entrypoint for the folio
//! document model: markup parsing and serialization, journal building,
//! image placement and rendering.
//!
//! This crate contains **no** extraction, network or upload logic. Media
//! references are resolved by the caller and passed to the renderer as a
//! plain key → reference map.

// -----------------------------------------------------------------------------
// Public API contract
// -----------------------------------------------------------------------------
//
// Consumers SHOULD import from `folio_io::prelude::*`.
// Anything not re-exported via the prelude is considered internal and may change
// without notice.

use std::sync::Arc;

// Re-export the document model.
#[doc(hidden)]
pub mod core {
    pub use folio_core::error::{MarkupError, MarkupResult};
    pub use folio_core::hash::{canonicalize_text, xxh3_hex};
    pub use folio_core::media::{ImageMetadata, ImageSource};
    pub use folio_core::model::{
        ContentData, ContentElement, ContentId, ContentType, DefinitionItem, DefinitionList,
        ListItems, Page, StatBlock, Table, TableRow, XMLDocument,
    };
    pub use folio_core::outline::{Chapter, ContainerRef, Section, Subsection, Subsubsection};
}

/// Deterministic JSON canonicalization helpers.
pub mod canonical_json;

/// Hash helpers for canonical JSON and journal digests.
pub mod hashing;

/// Versioned JSON snapshots of journals and image registries.
pub mod snapshot;

/// Format version constants.
pub mod version;

// Re-export markup parsing and serialization.
#[doc(hidden)]
pub mod markup {
    pub use folio_markup::escape::escape_xml;
    pub use folio_markup::{
        ParseOutcome, UnrecognisedTag, parse_document, parse_document_with_report, to_string,
        to_string_compact,
    };
}

// Re-export journal building and the image registry.
#[doc(hidden)]
pub mod journal {
    pub use folio_journal::{
        BuildDiagnostic, BuildOptions, BuildReport, DiagnosticCode, Hierarchy, ImageRegistry,
        Journal, OrphanPolicy, build_hierarchy, parse_image_key,
    };
}

// Re-export rendering.
#[doc(hidden)]
pub mod render {
    pub use folio_render::{
        BlockRenderer, PlainBlocks, RenderOptions, StructuredBlocks, render_journal,
        render_journal_using, render_journal_with,
    };
}

/// Convenience prelude for consumers.
///
/// This is the **only supported** import surface for external users.
pub mod prelude {
    pub use crate::core::{
        ContentData, ContentElement, ContentId, ContentType, ImageMetadata, ImageSource,
        MarkupError, Page, XMLDocument,
    };
    pub use crate::core::{Chapter, Section, Subsection, Subsubsection};
    pub use crate::journal::{
        BuildDiagnostic, BuildOptions, BuildReport, DiagnosticCode, ImageRegistry, Journal,
        OrphanPolicy,
    };
    pub use crate::markup::{parse_document, to_string, to_string_compact};
    pub use crate::render::{BlockRenderer, RenderOptions, render_journal, render_journal_with};
    pub use crate::snapshot::{JournalSnapshot, RegistrySnapshot, SnapshotError};
    pub use crate::{canonical_json, hashing, load_journal};
}

/// Parse `markup` and build a journal from it.
pub fn load_journal(
    markup: &str,
    opts: crate::journal::BuildOptions,
) -> crate::core::MarkupResult<(crate::journal::Journal, crate::journal::BuildReport)> {
    let document = crate::markup::parse_document(markup)?;
    Ok(crate::journal::Journal::build_with_options(
        Arc::new(document),
        opts,
    ))
}
