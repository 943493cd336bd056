//! Post-upload file relocation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::types::LogFile;

/// Move an uploaded file into the archive subfolder of its source
/// directory so it is not reprocessed. The folder is created on first use.
pub fn move_to_processed(
    file: &LogFile,
    source_dir: &Path,
    archive_dir: &str,
) -> Result<PathBuf, PipelineError> {
    move_into_subdir(file, source_dir, archive_dir)
}

/// Park a failed file in the triage subfolder.
pub fn move_to_failed(
    file: &LogFile,
    source_dir: &Path,
    failed_dir: &str,
) -> Result<PathBuf, PipelineError> {
    move_into_subdir(file, source_dir, failed_dir)
}

fn move_into_subdir(
    file: &LogFile,
    source_dir: &Path,
    subdir: &str,
) -> Result<PathBuf, PipelineError> {
    let dest_dir = source_dir.join(subdir);
    fs::create_dir_all(&dest_dir).map_err(|source| PipelineError::Archive {
        path: file.path.clone(),
        dest: dest_dir.clone(),
        source,
    })?;

    let dest = dest_dir.join(&file.name);
    fs::rename(&file.path, &dest).map_err(|source| PipelineError::Archive {
        path: file.path.clone(),
        dest: dest.clone(),
        source,
    })?;
    Ok(dest)
}
