//! Error taxonomy shared by the layer crates.

use thiserror::Error;

/// Fatal parse failure. Raised for unparsable or unbalanced markup, a
/// missing root element, and pages with a missing, zero or non-numeric
/// `number` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("malformed document: {message}{}", fmt_position(*position))]
    MalformedDocument {
        message: String,
        /// Byte offset into the input, when known.
        position: Option<u64>,
    },
}

fn fmt_position(position: Option<u64>) -> String {
    match position {
        Some(p) => format!(" (at byte {p})"),
        None => String::new(),
    }
}

impl MarkupError {
    pub fn malformed(message: impl Into<String>) -> Self {
        MarkupError::MalformedDocument {
            message: message.into(),
            position: None,
        }
    }

    pub fn malformed_at(message: impl Into<String>, position: u64) -> Self {
        MarkupError::MalformedDocument {
            message: message.into(),
            position: Some(position),
        }
    }

    pub fn missing_page_number(page_index: usize) -> Self {
        Self::malformed(format!("page[{page_index}] is missing its number attribute"))
    }

    pub fn invalid_page_number(page_index: usize, value: &str) -> Self {
        Self::malformed(format!(
            "page[{page_index}] number '{value}' is not a positive integer"
        ))
    }

    pub fn zero_page_number(page_index: usize) -> Self {
        Self::malformed(format!("page[{page_index}] number must be positive, got 0"))
    }

    /// Opening and closing tags that do not pair up.
    pub fn unbalanced_markup(detail: impl std::fmt::Display, position: u64) -> Self {
        Self::malformed_at(format!("unbalanced markup: {detail}"), position)
    }

    pub fn no_root_element() -> Self {
        Self::malformed("no root element")
    }

    pub fn message(&self) -> &str {
        match self {
            MarkupError::MalformedDocument { message, .. } => message,
        }
    }
}

pub type MarkupResult<T> = std::result::Result<T, MarkupError>;
