//! Source directory scanning.
//! Non-recursive, so files already moved into the archive subfolder are
//! never listed again.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::types::LogFile;

/// List the regular files directly under `dir`, oldest first.
pub fn list_log_files(dir: &Path) -> Result<Vec<LogFile>> {
    let entries = fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let meta = entry
            .metadata()
            .with_context(|| format!("stat {}", entry.path().display()))?;
        if !meta.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        files.push(LogFile {
            path: entry.path(),
            name,
            created: created_at(&meta),
        });
    }

    sort_oldest_first(&mut files);
    Ok(files)
}

/// Ascending by creation time, name as tiebreak so the order is stable on
/// filesystems with coarse timestamps.
pub fn sort_oldest_first(files: &mut [LogFile]) {
    files.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.name.cmp(&b.name)));
}

/// Birth time where the filesystem reports one, modification time otherwise.
fn created_at(meta: &fs::Metadata) -> DateTime<Utc> {
    meta.created()
        .or_else(|_| meta.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| DateTime::<Utc>::from(SystemTime::UNIX_EPOCH))
}
