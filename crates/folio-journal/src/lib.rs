#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the folio project.

Do NOT depend on this crate directly.
Use `folio-io` instead.
"#]

pub mod build;
pub mod diagnostics;
pub mod journal;
pub mod registry;
pub mod report;

pub use build::{BuildOptions, Hierarchy, OrphanPolicy, build_hierarchy};
pub use diagnostics::{BuildDiagnostic, DiagnosticCode};
pub use journal::Journal;
pub use registry::{ImageRegistry, parse_image_key};
pub use report::BuildReport;
