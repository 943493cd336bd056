//! Batch run orchestration.
//! Targets are processed in configuration order, files oldest first; each
//! file runs read -> parse -> name -> create stream -> put events -> archive.
//! A failure anywhere in one file's pipeline is logged and the run moves on.

use std::fs;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::archive;
use crate::config::Config;
use crate::error::PipelineError;
use crate::naming;
use crate::parse;
use crate::scan;
use crate::types::{LogFile, UploadTarget};
use crate::uploader::LogSink;

/// Outcome counters for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub targets_processed: usize,
    pub targets_skipped: usize,
    pub files_uploaded: usize,
    pub files_failed: usize,
    pub events_uploaded: usize,
}

/// Run the whole batch once. Only configuration-level problems surface as
/// an error; per-file failures are counted and logged.
pub async fn run<S: LogSink>(cfg: &Config, sink: &S) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for target in &cfg.targets {
        if !target.source_dir.is_dir() {
            error!(
                path = %target.source_dir.display(),
                log_group = %target.log_group,
                "source directory does not exist, skipping target"
            );
            summary.targets_skipped += 1;
            continue;
        }

        info!(
            log_group = %target.log_group,
            path = %target.source_dir.display(),
            "processing target"
        );

        let files = match scan::list_log_files(&target.source_dir) {
            Ok(files) => files,
            Err(err) => {
                error!(
                    path = %target.source_dir.display(),
                    "scan failed, skipping target: {err:#}"
                );
                summary.targets_skipped += 1;
                continue;
            }
        };
        info!(count = files.len(), "files discovered");

        for file in &files {
            match process_file(cfg, sink, target, file).await {
                Ok(events) => {
                    summary.files_uploaded += 1;
                    summary.events_uploaded += events;
                }
                Err(err) => {
                    error!(
                        file = %file.path.display(),
                        stage = err.stage(),
                        "file failed: {err}"
                    );
                    summary.files_failed += 1;
                    park_failed(cfg, target, file);
                }
            }
        }
        summary.targets_processed += 1;
    }

    info!(
        targets = summary.targets_processed,
        skipped = summary.targets_skipped,
        uploaded = summary.files_uploaded,
        failed = summary.files_failed,
        events = summary.events_uploaded,
        "run complete"
    );
    Ok(summary)
}

/// One file, end to end. The file is archived only when every stage before
/// it succeeded, so a failed upload leaves the file queued for the next run.
async fn process_file<S: LogSink>(
    cfg: &Config,
    sink: &S,
    target: &UploadTarget,
    file: &LogFile,
) -> Result<usize, PipelineError> {
    info!(file = %file.name, "processing file");

    let raw = fs::read_to_string(&file.path).map_err(|source| PipelineError::Read {
        path: file.path.clone(),
        source,
    })?;

    let mut events = parse::parse_lines(&raw)?;
    if events.is_empty() {
        info!(file = %file.name, "no events, archiving without upload");
        archive::move_to_processed(file, &target.source_dir, &cfg.archive_dir)?;
        return Ok(0);
    }

    // CloudWatch requires ascending timestamps within a batch.
    events.sort_by_key(|e| e.timestamp_ms);
    let count = events.len();

    let stream = naming::stream_name(file.created);
    sink.create_stream(&target.log_group, &stream).await?;
    sink.put_events(&target.log_group, &stream, events).await?;

    archive::move_to_processed(file, &target.source_dir, &cfg.archive_dir)?;
    Ok(count)
}

/// Best effort: with a triage folder configured, move the failed file out of
/// the scan path so a later run does not pick it up again.
fn park_failed(cfg: &Config, target: &UploadTarget, file: &LogFile) {
    let Some(failed_dir) = &cfg.failed_dir else {
        return;
    };
    if !file.path.exists() {
        return;
    }
    match archive::move_to_failed(file, &target.source_dir, failed_dir) {
        Ok(dest) => info!(file = %file.name, dest = %dest.display(), "moved to triage folder"),
        Err(err) => warn!(file = %file.name, "could not move to triage folder: {err}"),
    }
}
