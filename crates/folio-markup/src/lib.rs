#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the folio project.

Do NOT depend on this crate directly.
Use `folio-io` instead.
"#]

pub mod escape;
pub mod parse;
pub mod serialize;
mod tree;

pub use parse::{ParseOutcome, UnrecognisedTag, parse_document, parse_document_with_report};
pub use serialize::{to_string, to_string_compact};
