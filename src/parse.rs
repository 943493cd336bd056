//! Raw line parsing.
//! Lines look like `2024-01-01 10:00:00.000 [INFO]{"msg":"hi"}`: a timestamp
//! prefix, a bracketed severity tag, then a brace-delimited body. The
//! severity is folded into the body as its first field.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::PipelineError;
use crate::types::ParsedLine;

static LINE_RE: OnceLock<Regex> = OnceLock::new();

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

fn line_re() -> &'static Regex {
    LINE_RE.get_or_init(|| {
        Regex::new(r"^(?P<timestamp>[^\[\]]*?)\s*\[(?P<level>[^\]]*)\](?P<body>.*)$")
            .expect("line pattern is valid")
    })
}

/// Parse every line of a file. Blank lines are skipped; any other failure
/// fails the whole file, carrying the 1-based line number.
pub fn parse_lines(raw: &str) -> Result<Vec<ParsedLine>, PipelineError> {
    let mut events = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        events.push(parse_line(line, idx + 1)?);
    }
    Ok(events)
}

/// Parse one raw line into a timestamped event.
pub fn parse_line(raw: &str, line_no: usize) -> Result<ParsedLine, PipelineError> {
    let caps = line_re()
        .captures(raw)
        .ok_or_else(|| parse_error(line_no, "no [SEVERITY] tag found"))?;

    let prefix = caps.name("timestamp").map_or("", |m| m.as_str()).trim();
    let timestamp = parse_timestamp(prefix)
        .ok_or_else(|| parse_error(line_no, format!("unparsable timestamp {prefix:?}")))?;

    let level = caps.name("level").map_or("", |m| m.as_str());
    let body = caps.name("body").map_or("", |m| m.as_str()).trim();

    Ok(ParsedLine {
        timestamp_ms: timestamp.and_utc().timestamp_millis(),
        message: embed_level(body, level).ok_or_else(|| {
            parse_error(line_no, format!("body is not a braced structure: {body:?}"))
        })?,
    })
}

/// Insert `"Level": "<level>"` as the first field of the braced body.
fn embed_level(body: &str, level: &str) -> Option<String> {
    let rest = body.strip_prefix('{')?;
    if rest.trim_start() == "}" {
        return Some(format!("{{\"Level\": \"{level}\"}}"));
    }
    Some(format!("{{\"Level\": \"{level}\", {rest}"))
}

fn parse_timestamp(prefix: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(prefix, fmt).ok())
}

fn parse_error(line: usize, reason: impl Into<String>) -> PipelineError {
    PipelineError::Parse {
        line,
        reason: reason.into(),
    }
}
