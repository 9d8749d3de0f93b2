//! Deterministic JSON for digests.
//!
//! Object keys are sorted at every depth, arrays keep their order and the
//! output is minified. Sorting is explicit so the bytes do not depend on
//! whether `serde_json/preserve_order` is enabled anywhere in the build.

use serde::Serialize;
use serde_json::Value;

/// Serialize `value` to a `Value` with every object's keys sorted.
pub fn to_canonical_value<T: Serialize>(value: &T) -> Result<Value, serde_json::Error> {
    let mut v = serde_json::to_value(value)?;
    v.sort_all_objects();
    Ok(v)
}

pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&to_canonical_value(value)?)
}

pub fn to_canonical_json_string<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&to_canonical_value(value)?)
}
