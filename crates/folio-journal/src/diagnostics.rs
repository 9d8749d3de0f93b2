use serde::{Deserialize, Serialize};

/// Stable, machine-readable codes for non-fatal build degradations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// Non-heading content seen before any container was open; dropped.
    OrphanContentDropped,
    /// A heading whose parent level was not open; dropped.
    OrphanHeadingDropped,
    /// Non-heading orphan kept in the journal's unassigned bucket.
    OrphanContentCollected,
    /// Orphaned heading kept in the unassigned bucket; it opens no container.
    OrphanHeadingCollected,
    /// An unrecognised tag carried through as plain text.
    UnknownTagDegraded,
}

impl DiagnosticCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::OrphanContentDropped => "orphan_content_dropped",
            DiagnosticCode::OrphanHeadingDropped => "orphan_heading_dropped",
            DiagnosticCode::OrphanContentCollected => "orphan_content_collected",
            DiagnosticCode::OrphanHeadingCollected => "orphan_heading_collected",
            DiagnosticCode::UnknownTagDegraded => "unknown_tag_degraded",
        }
    }

    /// Whether the element is missing from the built hierarchy.
    pub const fn is_loss(self) -> bool {
        matches!(
            self,
            DiagnosticCode::OrphanContentDropped | DiagnosticCode::OrphanHeadingDropped
        )
    }
}

/// A single observable degradation recorded while building a journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDiagnostic {
    pub code: DiagnosticCode,
    pub page: u32,
    /// Page-scoped id of the element in the source document.
    pub source_id: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub message: String,
}
