//! Tests for source directory scanning.

use std::fs;

use chrono::{DateTime, NaiveDate, Utc};
use logship::scan::{list_log_files, sort_oldest_first};
use logship::types::LogFile;
use tempfile::tempdir;

fn at(ms: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_milli_opt(10, 0, 0, ms)
        .unwrap()
        .and_utc()
}

fn file(name: &str, created: DateTime<Utc>) -> LogFile {
    LogFile {
        path: format!("/logs/{name}").into(),
        name: name.to_string(),
        created,
    }
}

#[test]
fn test_empty_directory_yields_empty_list() {
    let dir = tempdir().unwrap();
    let files = list_log_files(dir.path()).unwrap();
    assert!(files.is_empty());
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(list_log_files(&missing).is_err());
}

#[test]
fn test_lists_regular_files_only() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.log"), "x").unwrap();
    fs::write(dir.path().join("b.log"), "y").unwrap();
    fs::create_dir(dir.path().join("delete")).unwrap();
    fs::write(dir.path().join("delete").join("archived.log"), "z").unwrap();

    let files = list_log_files(dir.path()).unwrap();
    let mut names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["a.log", "b.log"]);
}

#[test]
fn test_archived_files_are_never_relisted() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("delete")).unwrap();
    fs::write(dir.path().join("delete").join("old.log"), "z").unwrap();

    let files = list_log_files(dir.path()).unwrap();
    assert!(files.is_empty());
}

#[test]
fn test_creation_order_then_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.log"), "x").unwrap();
    fs::write(dir.path().join("b.log"), "y").unwrap();

    // a.log was written first; ties on coarse clocks fall back to name,
    // which gives the same order here.
    let files = list_log_files(dir.path()).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.log", "b.log"]);
}

#[test]
fn test_sort_is_by_creation_time_ascending() {
    let mut files = vec![
        file("late.log", at(300)),
        file("early.log", at(100)),
        file("middle.log", at(200)),
    ];
    sort_oldest_first(&mut files);
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["early.log", "middle.log", "late.log"]);
}

#[test]
fn test_sort_breaks_ties_by_name() {
    let mut files = vec![
        file("zeta.log", at(100)),
        file("alpha.log", at(100)),
        file("mid.log", at(100)),
    ];
    sort_oldest_first(&mut files);
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["alpha.log", "mid.log", "zeta.log"]);
}
