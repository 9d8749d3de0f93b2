use std::path::Path;
use std::sync::Arc;

use folio_core::model::XMLDocument;

#[allow(dead_code)]
pub fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!("failed to read fixture {} at {}: {e}", name, path.display())
    })
}

#[allow(dead_code)]
pub fn parse(markup: &str) -> Arc<XMLDocument> {
    Arc::new(folio_markup::parse_document(markup).expect("fixture markup must parse"))
}
