//! Tests for post-upload file relocation.

use std::fs;
use std::path::Path;

use chrono::Utc;
use logship::archive::{move_to_failed, move_to_processed};
use logship::scan::list_log_files;
use logship::types::LogFile;
use tempfile::tempdir;

fn log_file(dir: &Path, name: &str) -> LogFile {
    let path = dir.join(name);
    fs::write(&path, "2024-01-01 10:00:00.000 [INFO]{}\n").unwrap();
    LogFile {
        path,
        name: name.to_string(),
        created: Utc::now(),
    }
}

#[test]
fn test_move_to_processed_creates_subfolder() {
    let dir = tempdir().unwrap();
    let file = log_file(dir.path(), "app.log");

    let dest = move_to_processed(&file, dir.path(), "delete").unwrap();
    assert_eq!(dest, dir.path().join("delete").join("app.log"));
    assert!(dest.is_file());
    assert!(!file.path.exists());
}

#[test]
fn test_move_to_failed_uses_triage_folder() {
    let dir = tempdir().unwrap();
    let file = log_file(dir.path(), "bad.log");

    let dest = move_to_failed(&file, dir.path(), "failed").unwrap();
    assert_eq!(dest, dir.path().join("failed").join("bad.log"));
    assert!(dest.is_file());
}

#[test]
fn test_archived_file_leaves_the_scan_path() {
    let dir = tempdir().unwrap();
    let file = log_file(dir.path(), "app.log");

    move_to_processed(&file, dir.path(), "delete").unwrap();
    let files = list_log_files(dir.path()).unwrap();
    assert!(files.is_empty());
}

#[test]
fn test_move_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let file = LogFile {
        path: dir.path().join("ghost.log"),
        name: "ghost.log".to_string(),
        created: Utc::now(),
    };

    let err = move_to_processed(&file, dir.path(), "delete").unwrap_err();
    assert_eq!(err.stage(), "archive");
}
