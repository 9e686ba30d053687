//! Log records and the line layouts sinks render them with

use std::borrow::Cow;

use chrono::{DateTime, Local, NaiveDateTime};

use crate::severity::Severity;

/// Timestamp layout shared by the file sinks, e.g. `2026-01-21 14:30:45,123`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Field delimiter used by the file layouts
pub const FIELD_SEPARATOR: &str = " - ";

/// How a sink turns a record into a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `<message>`
    MessageOnly,
    /// `<timestamp> - <logger> - <LEVEL> - <message>`
    Standard,
    /// `<timestamp> - <message>`, suitable for copying into FITS headers
    Timestamped,
}

/// A single emitted message
#[derive(Debug, Clone)]
pub struct Record {
    /// When the message was emitted
    pub timestamp: DateTime<Local>,
    /// Name of the emitting logger
    pub logger: String,
    pub severity: Severity,
    pub message: String,
}

impl Record {
    /// Create a record stamped with the current local time
    pub fn new(logger: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            logger: logger.into(),
            severity,
            message: message.into(),
        }
    }

    /// Render the record without a trailing newline
    ///
    /// The file layouts escape line breaks in the message as `\n` and `\r`
    /// so every record stays on one physical line.
    pub fn format(&self, layout: Layout) -> String {
        match layout {
            Layout::MessageOnly => self.message.clone(),
            Layout::Standard => format!(
                "{ts}{sep}{name}{sep}{level}{sep}{msg}",
                ts = self.timestamp.format(TIMESTAMP_FORMAT),
                name = self.logger,
                level = self.severity.name(),
                msg = single_line(&self.message),
                sep = FIELD_SEPARATOR,
            ),
            Layout::Timestamped => format!(
                "{}{}{}",
                self.timestamp.format(TIMESTAMP_FORMAT),
                FIELD_SEPARATOR,
                single_line(&self.message)
            ),
        }
    }

    /// Parse a line produced with [`Layout::Standard`]
    ///
    /// Only the first three separators split fields, so messages containing
    /// `" - "` survive intact.
    pub fn parse_standard(line: &str) -> Option<ParsedLine> {
        let mut parts = line.trim_end_matches(['\r', '\n']).splitn(4, FIELD_SEPARATOR);
        let timestamp = parts.next()?;
        let logger = parts.next()?;
        let level = parts.next()?;
        let message = parts.next()?;

        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
        let severity = level.parse().ok()?;

        Some(ParsedLine {
            timestamp,
            logger: logger.to_string(),
            severity,
            message: message.to_string(),
        })
    }
}

fn single_line(message: &str) -> Cow<'_, str> {
    if message.contains(['\n', '\r']) {
        Cow::Owned(message.replace('\r', "\\r").replace('\n', "\\n"))
    } else {
        Cow::Borrowed(message)
    }
}

/// Fields recovered from a standard file line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub timestamp: NaiveDateTime,
    pub logger: String,
    pub severity: Severity,
    pub message: String,
}
