use serde::{Deserialize, Serialize};

use crate::diagnostics::{BuildDiagnostic, DiagnosticCode};

/// Deterministic summary of one hierarchy build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub chapters: usize,
    pub sections: usize,
    pub subsections: usize,
    pub subsubsections: usize,
    /// Non-heading elements placed inside a container.
    pub placed_content: usize,
    /// Elements moved to the unassigned bucket.
    pub unassigned: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<BuildDiagnostic>,
}

impl BuildReport {
    /// Elements missing from the built journal.
    pub fn dropped_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.code.is_loss()).count()
    }

    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.diagnostics.iter().filter(|d| d.code == code).count()
    }

    pub fn is_lossless(&self) -> bool {
        self.dropped_count() == 0
    }
}
