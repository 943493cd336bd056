//! CloudWatch Logs upload calls.

use aws_sdk_cloudwatchlogs::types::InputLogEvent;
use aws_sdk_cloudwatchlogs::Client as CwClient;
use tracing::info;

use crate::error::PipelineError;
use crate::types::ParsedLine;

/// The two remote calls one file's pipeline makes. A seam so the runner can
/// be exercised against an in-memory sink.
#[allow(async_fn_in_trait)]
pub trait LogSink {
    async fn create_stream(&self, group: &str, stream: &str) -> Result<(), PipelineError>;

    /// Upload the full set of parsed lines as a single batch call. Events
    /// must already be in timestamp-ascending order.
    async fn put_events(
        &self,
        group: &str,
        stream: &str,
        events: Vec<ParsedLine>,
    ) -> Result<(), PipelineError>;
}

#[derive(Clone)]
pub struct CwUploader {
    client: CwClient,
}

impl CwUploader {
    pub fn new(client: CwClient) -> Self {
        Self { client }
    }
}

impl LogSink for CwUploader {
    async fn create_stream(&self, group: &str, stream: &str) -> Result<(), PipelineError> {
        self.client
            .create_log_stream()
            .log_group_name(group)
            .log_stream_name(stream)
            .send()
            .await
            .map_err(|err| PipelineError::StreamCreation {
                stream: stream.to_string(),
                reason: format!("{err:?}"),
            })?;
        info!(log_group = group, stream, "log stream created");
        Ok(())
    }

    async fn put_events(
        &self,
        group: &str,
        stream: &str,
        events: Vec<ParsedLine>,
    ) -> Result<(), PipelineError> {
        let count = events.len();
        let events = events
            .into_iter()
            .map(|e| {
                InputLogEvent::builder()
                    .timestamp(e.timestamp_ms)
                    .message(e.message)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| PipelineError::Upload {
                stream: stream.to_string(),
                reason: format!("{err:?}"),
            })?;

        self.client
            .put_log_events()
            .log_group_name(group)
            .log_stream_name(stream)
            .set_log_events(Some(events))
            .send()
            .await
            .map_err(|err| PipelineError::Upload {
                stream: stream.to_string(),
                reason: format!("{err:?}"),
            })?;
        info!(log_group = group, stream, count, "events uploaded");
        Ok(())
    }
}
