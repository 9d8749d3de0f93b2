use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ContentId;

/// Where a registry entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// Discovered as an `image_ref` placeholder in the source pages.
    Extracted,
    /// Produced by an image generation collaborator.
    Generated,
    /// Added by hand in an editing tool.
    Manual,
}

impl ImageSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            ImageSource::Extracted => "extracted",
            ImageSource::Generated => "generated",
            ImageSource::Manual => "manual",
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Placement metadata for one media entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    #[serde(rename = "type")]
    pub image_type: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Content id the media is rendered in front of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_before_content_id: Option<ContentId>,
    pub source: ImageSource,
}

impl ImageMetadata {
    pub fn new(image_type: impl Into<String>, position: impl Into<String>, source: ImageSource) -> Self {
        Self {
            page_num: None,
            image_type: image_type.into(),
            position: position.into(),
            description: None,
            insert_before_content_id: None,
            source,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn anchored_before(mut self, content_id: impl Into<ContentId>) -> Self {
        self.insert_before_content_id = Some(content_id.into());
        self
    }

    pub fn on_page(mut self, page_num: u32) -> Self {
        self.page_num = Some(page_num);
        self
    }
}
