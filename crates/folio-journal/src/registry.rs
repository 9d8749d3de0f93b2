//! Out-of-band media placement, keyed by opaque image keys.
//!
//! The registry never touches the content stream: `image_ref` placeholders
//! stay where extraction put them and only registry entries decide where
//! media is rendered.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use folio_core::media::{ImageMetadata, ImageSource};
use folio_core::model::XMLDocument;

/// Position used when an extracted key carries none.
pub const DEFAULT_POSITION: &str = "inline";
/// Type used when an extracted key carries none.
pub const DEFAULT_IMAGE_TYPE: &str = "illustration";

/// Key → metadata map, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRegistry {
    entries: BTreeMap<String, ImageMetadata>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ImageMetadata> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ImageMetadata)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries rendered in front of `content_id`, in key order.
    pub fn anchored_to<'a>(
        &'a self,
        content_id: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a ImageMetadata)> + 'a {
        self.iter()
            .filter(move |(_, m)| m.insert_before_content_id.as_deref() == Some(content_id))
    }

    /// Register every non-empty `image_ref` key of `doc` not yet present.
    ///
    /// Scans the page stream, not the built hierarchy, so orphaned
    /// placeholders are registered too. Returns the number of new keys.
    pub fn extract(&mut self, doc: &XMLDocument) -> usize {
        let mut added = 0;
        for (_, element) in doc.elements() {
            let Some(key) = element.image_key() else {
                continue;
            };
            if key.is_empty() || self.entries.contains_key(key) {
                continue;
            }
            self.entries.insert(key.to_string(), metadata_from_key(key));
            added += 1;
        }
        debug!(added, total = self.entries.len(), "extracted image placeholders");
        added
    }

    /// Insert or overwrite an entry.
    pub fn add(&mut self, key: impl Into<String>, metadata: ImageMetadata) {
        self.entries.insert(key.into(), metadata);
    }

    /// Move an entry in front of another content element.
    ///
    /// Only `insert_before_content_id` changes. Unknown keys are a no-op;
    /// returns whether an entry was updated.
    pub fn reposition(&mut self, key: &str, content_id: impl Into<String>) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.insert_before_content_id = Some(content_id.into());
                true
            }
            None => {
                debug!(key, "reposition of unknown image key ignored");
                false
            }
        }
    }

    /// Remove an entry; unknown keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<ImageMetadata> {
        let removed = self.entries.remove(key);
        if removed.is_none() {
            debug!(key, "removal of unknown image key ignored");
        }
        removed
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl IntoIterator for ImageRegistry {
    type Item = (String, ImageMetadata);
    type IntoIter = std::collections::btree_map::IntoIter<String, ImageMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, ImageMetadata)> for ImageRegistry {
    fn from_iter<I: IntoIterator<Item = (String, ImageMetadata)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Parse `page_<N>_<position>_<type…>` into `(page_num, position, type)`.
///
/// Best effort: anything that does not follow the convention yields
/// `(None, "inline", "illustration")`.
pub fn parse_image_key(key: &str) -> (Option<u32>, String, String) {
    let defaults = || (DEFAULT_POSITION.to_string(), DEFAULT_IMAGE_TYPE.to_string());

    let Some(rest) = key.strip_prefix("page_") else {
        let (position, kind) = defaults();
        return (None, position, kind);
    };

    let mut parts = rest.splitn(3, '_');
    let page_num = parts.next().and_then(|n| n.parse::<u32>().ok());
    if page_num.is_none() {
        let (position, kind) = defaults();
        return (None, position, kind);
    }

    let position = parts
        .next()
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_POSITION)
        .to_string();
    let kind = parts
        .next()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_IMAGE_TYPE)
        .to_string();

    (page_num, position, kind)
}

fn metadata_from_key(key: &str) -> ImageMetadata {
    let (page_num, position, image_type) = parse_image_key(key);
    ImageMetadata {
        page_num,
        image_type,
        position,
        description: None,
        insert_before_content_id: None,
        source: ImageSource::Extracted,
    }
}
