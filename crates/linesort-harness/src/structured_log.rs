//! Structured logging contract for linesort test workflows.
//!
//! Provides:
//! - [`LogEntry`]: canonical JSONL log record with required + optional fields.
//! - [`LogEmitter`]: writes JSONL lines to a file or stdout.
//! - [`validate_log_line`] / [`validate_log_file`]: schema validation.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Test/verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
    Error,
}

/// Canonical structured log entry.
///
/// Required fields: `timestamp`, `trace_id`, `level`, `event`. The
/// optional fields carry fixture context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    // Required
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    // Optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create a new log entry with required fields only.
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            case: None,
            mode: None,
            outcome: None,
            duration_ms: None,
            details: None,
        }
    }

    /// Attach the fixture case name.
    #[must_use]
    pub fn with_case(mut self, case: impl Into<String>) -> Self {
        self.case = Some(case.into());
        self
    }

    /// Attach the comparator mode.
    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Attach a verification outcome.
    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Attach free-form details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Writes JSONL entries to a file or stdout.
pub struct LogEmitter {
    out: Box<dyn Write>,
}

impl LogEmitter {
    /// Emit to a file, truncating any existing content.
    pub fn to_file(path: &Path) -> io::Result<Self> {
        Ok(Self {
            out: Box::new(std::fs::File::create(path)?),
        })
    }

    /// Emit to stdout.
    #[must_use]
    pub fn to_stdout() -> Self {
        Self {
            out: Box::new(io::stdout()),
        }
    }

    /// Write one entry as a JSONL line.
    pub fn emit(&mut self, entry: &LogEntry) -> io::Result<()> {
        let line = serde_json::to_string(entry).map_err(io::Error::other)?;
        writeln!(self.out, "{line}")
    }
}

/// Validation failures for the log schema.
#[derive(Debug, Error)]
pub enum LogValidationError {
    #[error("line {line}: invalid json: {source}")]
    InvalidJson {
        line: usize,
        source: serde_json::Error,
    },
    #[error("line {line}: missing required field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: unknown level `{value}`")]
    UnknownLevel { line: usize, value: String },
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "fatal"];

/// Validates a single JSONL line against the schema.
pub fn validate_log_line(line_no: usize, line: &str) -> Result<(), LogValidationError> {
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|source| LogValidationError::InvalidJson {
            line: line_no,
            source,
        })?;
    for field in ["timestamp", "trace_id", "level", "event"] {
        if value.get(field).and_then(serde_json::Value::as_str).is_none() {
            return Err(LogValidationError::MissingField {
                line: line_no,
                field,
            });
        }
    }
    let level = value["level"].as_str().unwrap_or_default();
    if !LEVELS.contains(&level) {
        return Err(LogValidationError::UnknownLevel {
            line: line_no,
            value: level.to_string(),
        });
    }
    Ok(())
}

/// Validates an entire JSONL file; returns the number of entries.
pub fn validate_log_file(path: &Path) -> Result<usize, LogValidationError> {
    let content = std::fs::read_to_string(path)?;
    let mut count = 0;
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        validate_log_line(idx + 1, line)?;
        count += 1;
    }
    Ok(count)
}

/// Current UTC time, formatted without an external clock dependency.
#[must_use]
pub fn now_utc() -> String {
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    let (year, month, day) = civil_from_days((secs / 86_400) as i64);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year,
        month,
        day,
        (secs % 86_400) / 3_600,
        (secs % 3_600) / 60,
        secs % 60,
        millis,
    )
}

// Gregorian date from days since the epoch (civil-from-days).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
