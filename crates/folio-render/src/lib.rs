#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the folio project.

Do NOT depend on this crate directly.
Use `folio-io` instead.
"#]

pub mod blocks;
pub mod escape;
pub mod options;
pub mod render;

pub use blocks::{BlockRenderer, PlainBlocks, StructuredBlocks};
pub use options::RenderOptions;
pub use render::{render_journal, render_journal_using, render_journal_with};
