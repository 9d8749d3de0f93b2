//! Versioned JSON views of a journal.
//!
//! A [`JournalSnapshot`] is export-only: journals are rebuilt from their
//! source markup, never from JSON. A [`RegistrySnapshot`] goes both ways so
//! media placement can be persisted and restored on top of a fresh build.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use folio_core::model::ContentElement;
use folio_core::outline::Chapter;
use folio_journal::{ImageRegistry, Journal};

use crate::version::{REGISTRY_SNAPSHOT_V, SNAPSHOT_V};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("invalid registry snapshot shape: {0}")]
    InvalidShape(#[source] serde_json::Error),
    #[error("unsupported registry snapshot version {found}; supported: {supported}")]
    UnsupportedVersion { found: u64, supported: u8 },
}

/// Serialized form of a built journal.
#[derive(Debug, Clone, Serialize)]
pub struct JournalSnapshot<'a> {
    pub v: u8,
    pub title: &'a str,
    pub source_fingerprint: &'a str,
    pub chapters: &'a [Chapter],
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub unassigned: &'a [ContentElement],
    pub images: &'a ImageRegistry,
}

impl<'a> JournalSnapshot<'a> {
    pub fn of(journal: &'a Journal) -> Self {
        Self {
            v: SNAPSHOT_V,
            title: journal.title(),
            source_fingerprint: journal.source_fingerprint(),
            chapters: journal.chapters(),
            unassigned: journal.unassigned(),
            images: journal.image_registry(),
        }
    }
}

fn is_empty_slice<T>(items: &&[T]) -> bool {
    items.is_empty()
}

/// Portable image registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub v: u8,
    pub images: ImageRegistry,
}

impl RegistrySnapshot {
    pub fn of(journal: &Journal) -> Self {
        Self {
            v: REGISTRY_SNAPSHOT_V,
            images: journal.image_registry().clone(),
        }
    }

    /// Replace `journal`'s registry with this snapshot's entries.
    ///
    /// Anchors are not checked against the hierarchy; an anchor that
    /// matches nothing simply never renders.
    pub fn apply_to(self, journal: &mut Journal) {
        debug!(images = self.images.len(), "restoring image registry");
        journal.replace_images(self.images);
    }
}

/// Parse a registry snapshot, rejecting unknown versions before the shape
/// is checked.
pub fn parse_registry_snapshot_str(s: &str) -> Result<RegistrySnapshot, SnapshotError> {
    let value: serde_json::Value = serde_json::from_str(s).map_err(SnapshotError::InvalidJson)?;

    if let Some(found) = value.get("v").and_then(serde_json::Value::as_u64) {
        if found != u64::from(REGISTRY_SNAPSHOT_V) {
            return Err(SnapshotError::UnsupportedVersion {
                found,
                supported: REGISTRY_SNAPSHOT_V,
            });
        }
    }

    serde_json::from_value(value).map_err(SnapshotError::InvalidShape)
}

/// Pretty JSON for a registry snapshot.
pub fn registry_snapshot_to_pretty_json(
    snapshot: &RegistrySnapshot,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}
