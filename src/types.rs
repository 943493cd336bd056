use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One configured source: a local directory whose rotated files are shipped
/// into the named CloudWatch log group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTarget {
    pub source_dir: PathBuf,
    pub log_group: String,
}

/// A file discovered in a source directory, ordered by creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub name: String,
    pub created: DateTime<Utc>,
}

/// One raw line transformed into a CloudWatch input event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    pub timestamp_ms: i64,
    pub message: String,
}
