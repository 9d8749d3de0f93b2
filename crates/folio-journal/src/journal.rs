use std::sync::Arc;

use tracing::{info, instrument};

use folio_core::media::ImageMetadata;
use folio_core::model::{ContentElement, XMLDocument};
use folio_core::outline::{Chapter, ContainerRef, walk_containers};

use crate::build::{BuildOptions, build_hierarchy};
use crate::registry::ImageRegistry;
use crate::report::BuildReport;

/// Semantic, editable view of an extracted document.
///
/// Built once from an [`XMLDocument`]; the hierarchy is never re-derived.
/// The only mutable part is the image registry, reachable through
/// `add_image`, `reposition_image`, `remove_image` and `extract_images`.
/// Callers sharing a `Journal` across threads must serialize access.
#[derive(Debug, Clone)]
pub struct Journal {
    source: Arc<XMLDocument>,
    source_fingerprint: String,
    chapters: Vec<Chapter>,
    unassigned: Vec<ContentElement>,
    image_registry: ImageRegistry,
}

impl Journal {
    /// Build with default options (orphans dropped).
    pub fn build(source: Arc<XMLDocument>) -> Self {
        Self::build_with_options(source, BuildOptions::default()).0
    }

    #[instrument(level = "debug", skip_all, fields(title = %source.title))]
    pub fn build_with_options(source: Arc<XMLDocument>, opts: BuildOptions) -> (Self, BuildReport) {
        let (hierarchy, report) = build_hierarchy(&source, opts);

        let mut image_registry = ImageRegistry::new();
        image_registry.extract(&source);

        let journal = Self {
            source_fingerprint: source.fingerprint(),
            source,
            chapters: hierarchy.chapters,
            unassigned: hierarchy.unassigned,
            image_registry,
        };
        info!(
            chapters = journal.chapters.len(),
            images = journal.image_registry.len(),
            "journal ready"
        );
        (journal, report)
    }

    pub fn title(&self) -> &str {
        &self.source.title
    }

    pub fn source(&self) -> &Arc<XMLDocument> {
        &self.source
    }

    /// Fingerprint of `source` taken at build time.
    pub fn source_fingerprint(&self) -> &str {
        &self.source_fingerprint
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Orphans kept under `OrphanPolicy::Collect`; empty otherwise.
    pub fn unassigned(&self) -> &[ContentElement] {
        &self.unassigned
    }

    pub fn image_registry(&self) -> &ImageRegistry {
        &self.image_registry
    }

    /// All containers in pre-order.
    pub fn containers(&self) -> Vec<ContainerRef<'_>> {
        walk_containers(&self.chapters)
    }

    pub fn container_ids(&self) -> Vec<&str> {
        self.containers().into_iter().map(|c| c.id()).collect()
    }

    /// Content ids in render order, unassigned bucket first.
    pub fn content_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.unassigned.iter().map(|c| c.id.as_str()).collect();
        for container in self.containers() {
            ids.extend(container.content().iter().map(|c| c.id.as_str()));
        }
        ids
    }

    pub fn find_content(&self, id: &str) -> Option<&ContentElement> {
        self.unassigned.iter().find(|c| c.id == id).or_else(|| {
            self.containers()
                .into_iter()
                .find_map(|container| container.content().iter().find(|c| c.id == id))
        })
    }

    /// Content elements placed in the hierarchy (unassigned excluded).
    pub fn non_heading_count(&self) -> usize {
        self.containers().iter().map(|c| c.content().len()).sum()
    }

    /// Re-run placeholder extraction over `source`. Existing entries are
    /// left alone; returns the number of keys added.
    pub fn extract_images(&mut self) -> usize {
        self.image_registry.extract(&self.source)
    }

    /// Insert or overwrite a registry entry.
    pub fn add_image(&mut self, key: impl Into<String>, metadata: ImageMetadata) {
        self.image_registry.add(key, metadata);
    }

    /// Update only the anchor of an existing entry; no-op for unknown keys.
    pub fn reposition_image(&mut self, key: &str, content_id: impl Into<String>) -> bool {
        self.image_registry.reposition(key, content_id)
    }

    /// Remove an entry; no-op for unknown keys.
    pub fn remove_image(&mut self, key: &str) -> Option<ImageMetadata> {
        self.image_registry.remove(key)
    }

    /// Replace the whole registry, e.g. with one restored from disk.
    pub fn replace_images<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, ImageMetadata)>,
    {
        self.image_registry.clear();
        for (key, metadata) in entries {
            self.image_registry.add(key, metadata);
        }
    }
}
