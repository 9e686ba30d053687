//! Output sinks
//!
//! Each sink carries an explicit [`SinkKind`] tag, its own threshold and a
//! line layout. File sinks open their target in append mode when built and
//! flush after every line, so a returned write is on disk.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::console::ConsoleTarget;
use crate::error::{LogError, Result};
use crate::record::{Layout, Record};
use crate::severity::Severity;

/// Role of a sink within a logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Transient, message-only output to the console
    Console,
    /// The standard `<name>.log` file
    File,
    /// The machine-parseable `<name>.fitsFormat.log` file
    MachineFile,
}

/// A thresholded destination for formatted records
pub struct Sink {
    kind: SinkKind,
    threshold: Severity,
    layout: Layout,
    path: Option<PathBuf>,
    writer: Box<dyn Write + Send>,
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("kind", &self.kind)
            .field("threshold", &self.threshold)
            .field("layout", &self.layout)
            .field("path", &self.path)
            .finish()
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogError::sink_io(path, e))
}

impl Sink {
    /// Console sink writing bare messages
    pub fn console(threshold: Severity, target: &dyn ConsoleTarget) -> Self {
        Self {
            kind: SinkKind::Console,
            threshold,
            layout: Layout::MessageOnly,
            path: None,
            writer: target.make_writer(),
        }
    }

    /// Standard file sink, creating the file if absent
    pub fn file(path: impl Into<PathBuf>, threshold: Severity) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        Ok(Self {
            kind: SinkKind::File,
            threshold,
            layout: Layout::Standard,
            path: Some(path),
            writer: Box::new(file),
        })
    }

    /// Machine-parseable file sink (timestamp and message only)
    pub fn machine_file(path: impl Into<PathBuf>, threshold: Severity) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        Ok(Self {
            kind: SinkKind::MachineFile,
            threshold,
            layout: Layout::Timestamped,
            path: Some(path),
            writer: Box::new(file),
        })
    }

    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Backing file, if this is a file sink
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether a record at `level` passes this sink's threshold
    pub fn accepts(&self, level: Severity) -> bool {
        level.rank() >= self.threshold.rank()
    }

    /// Write the record if accepted
    ///
    /// Returns `true` when a line was physically written.
    pub fn write(&mut self, record: &Record) -> Result<bool> {
        if !self.accepts(record.severity) {
            return Ok(false);
        }

        let mut line = record.format(self.layout);
        line.push('\n');

        let result = self
            .writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.flush());

        match result {
            Ok(()) => Ok(true),
            Err(e) => Err(LogError::sink_io(
                self.path.clone().unwrap_or_else(|| PathBuf::from("<console>")),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::CaptureBuffer;
    use tempfile::TempDir;

    #[test]
    fn test_accepts_compares_ranks() {
        let buffer = CaptureBuffer::new();
        let sink = Sink::console(Severity::Info, &buffer);

        assert!(sink.accepts(Severity::Info));
        assert!(sink.accepts(Severity::ToolError));
        assert!(!sink.accepts(Severity::ToolWarning));
        assert!(!sink.accepts(Severity::Debug));
    }

    #[test]
    fn test_console_writes_message_only() {
        let buffer = CaptureBuffer::new();
        let mut sink = Sink::console(Severity::Info, &buffer);

        assert!(sink
            .write(&Record::new("pipeline", Severity::MainInfo, "starting"))
            .unwrap());
        assert!(!sink
            .write(&Record::new("pipeline", Severity::Debug, "hidden"))
            .unwrap());

        assert_eq!(buffer.contents(), "starting\n");
    }

    #[test]
    fn test_file_sink_creates_and_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pipeline.log");

        let mut sink = Sink::file(&path, Severity::NotSet).unwrap();
        assert!(path.exists());
        assert_eq!(sink.kind(), SinkKind::File);
        assert_eq!(sink.path(), Some(path.as_path()));

        sink.write(&Record::new("pipeline", Severity::Summary, "one"))
            .unwrap();
        drop(sink);

        let mut reopened = Sink::file(&path, Severity::NotSet).unwrap();
        reopened
            .write(&Record::new("pipeline", Severity::Summary, "two"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - pipeline - SUMMARY - one"));
        assert!(lines[1].ends_with(" - pipeline - SUMMARY - two"));
    }

    #[test]
    fn test_machine_file_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pipeline.fitsFormat.log");

        let mut sink = Sink::machine_file(&path, Severity::NotSet).unwrap();
        assert_eq!(sink.kind(), SinkKind::MachineFile);
        sink.write(&Record::new("pipeline", Severity::PrimInfo, "NFRAMES = 4"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with(" - NFRAMES = 4\n"));
        assert!(!content.contains("PRIMINFO"));
        assert!(!content.contains("pipeline"));
    }

    #[test]
    fn test_file_sink_open_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("pipeline.log");

        let err = Sink::file(&path, Severity::NotSet).unwrap_err();
        match err {
            LogError::SinkIo { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
