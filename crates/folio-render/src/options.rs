//! Configuration options for journal rendering.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Wrapper for paragraphs and unrecognised text.
    pub paragraph_tag: String,
    /// Wrapper for boxed (read-aloud) text.
    pub boxed_text_tag: String,
    /// Class put on the boxed text wrapper; omitted when empty.
    pub boxed_text_class: String,
    /// Class put on the `<figure>` around spliced media.
    pub image_class: String,
    /// Render tables, lists, definition lists and stat blocks as real
    /// markup instead of plain text.
    pub structured: bool,
    /// Render the unassigned bucket (if any) ahead of the first chapter.
    pub include_unassigned: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            paragraph_tag: "p".to_string(),
            boxed_text_tag: "blockquote".to_string(),
            boxed_text_class: "boxed-text".to_string(),
            image_class: "journal-image".to_string(),
            structured: false,
            include_unassigned: true,
        }
    }
}
