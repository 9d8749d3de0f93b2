//! xxh3 helpers behind `XMLDocument::fingerprint`.

use xxhash_rust::xxh3::{Xxh3, xxh3_64};

/// Normalize payload text so that line-ending style and trailing blanks do
/// not change a fingerprint.
///
/// CRLF and lone CR become LF; spaces and tabs at the end of each line are
/// dropped. A final newline, leading whitespace and everything else stay.
pub fn canonicalize_text(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n")
}

/// xxh3-64 of the UTF-8 bytes as 16 lowercase hex chars.
pub fn xxh3_hex(input: &str) -> String {
    format!("{:016x}", xxh3_64(input.as_bytes()))
}

/// `xxh3_hex` of the canonicalized text.
pub fn xxh3_canon_hex(input: &str) -> String {
    xxh3_hex(&canonicalize_text(input))
}

/// Streaming xxh3 over tab-separated, newline-terminated records.
///
/// Produces the same digest as hashing the concatenated records at once.
#[derive(Clone, Default)]
pub struct RecordHasher {
    state: Xxh3,
}

impl RecordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, fields: &[&str]) -> &mut Self {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.state.update(b"\t");
            }
            self.state.update(field.as_bytes());
        }
        self.state.update(b"\n");
        self
    }

    pub fn finish_hex(&self) -> String {
        format!("{:016x}", self.state.digest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_normalizes_newlines_and_trailing_ws() {
        assert_eq!(canonicalize_text("a  \r\nb\t\rc "), "a\nb\nc");
        assert_eq!(canonicalize_text("  lead\n"), "  lead\n");
        assert_eq!(canonicalize_text(""), "");
    }

    #[test]
    fn hex_is_fixed_width() {
        assert_eq!(xxh3_hex("").len(), 16);
        assert_eq!(xxh3_canon_hex("x \n"), xxh3_hex("x\n"));
    }

    #[test]
    fn streaming_matches_one_shot() {
        let mut hasher = RecordHasher::new();
        hasher.record(&["title"]).record(&["a", "b", "c"]);
        assert_eq!(hasher.finish_hex(), xxh3_hex("title\na\tb\tc\n"));
    }
}
