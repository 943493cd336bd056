//! Log stream naming.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Exclusive upper bound for the random suffix.
pub const SUFFIX_SPACE: u32 = 10_000;

/// Derive a stream name `YYYYMMDD_HHMMSSmmm_<suffix>` from a file's
/// creation time. Sortable by timestamp; the random suffix keeps
/// same-millisecond files apart, best effort only.
pub fn stream_name(created: DateTime<Utc>) -> String {
    stream_name_with_suffix(created, rand::rng().random_range(0..SUFFIX_SPACE))
}

/// Deterministic variant with the suffix supplied by the caller.
pub fn stream_name_with_suffix(created: DateTime<Utc>, suffix: u32) -> String {
    format!("{}_{}", created.format("%Y%m%d_%H%M%S%3f"), suffix)
}
