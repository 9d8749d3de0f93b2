#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the folio project.

Do NOT depend on this crate directly.
Use `folio-io` instead.
"#]

pub mod error;
pub mod hash;
pub mod media;
pub mod model;
pub mod outline;
