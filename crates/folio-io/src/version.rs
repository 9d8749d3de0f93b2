//! Format version constants for on-disk artifacts.

/// Journal snapshot format version.
///
/// This corresponds to the `v` field of [`crate::snapshot::JournalSnapshot`].
pub const SNAPSHOT_V: u8 = 1;

/// Image registry snapshot format version.
///
/// Bump this if the metadata shape changes; imports reject other values.
pub const REGISTRY_SNAPSHOT_V: u8 = 1;
