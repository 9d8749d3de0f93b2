use std::path::PathBuf;

#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join(name)
}

#[allow(dead_code)]
pub fn fixture_arg(name: &str) -> String {
    fixture(name).to_str().expect("utf-8 fixture path").to_string()
}
