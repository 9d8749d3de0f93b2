//! Hash helpers for canonical JSON and journal digests.

use serde::Serialize;

use folio_journal::Journal;

use crate::canonical_json::to_canonical_json_bytes;
use crate::snapshot::JournalSnapshot;

/// Return lowercase hex SHA-256 of bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Hash canonical JSON bytes using SHA-256 and return lowercase hex.
pub fn sha256_canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(sha256_hex(&bytes))
}

/// Digest of everything a journal renders from: hierarchy, unassigned
/// content and image registry.
///
/// Formatted as `sha256:<hex>`. Registry edits change the digest; the
/// source fingerprint alone does not track them.
pub fn journal_digest(journal: &Journal) -> Result<String, serde_json::Error> {
    let hash = sha256_canonical_json(&JournalSnapshot::of(journal))?;
    Ok(format!("sha256:{hash}"))
}
