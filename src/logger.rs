//! Named loggers
//!
//! A [`Logger`] owns a gate and an ordered list of sinks. Emission first
//! checks the gate, then offers the record to every sink, each of which
//! filters on its own threshold. Gate and sinks live behind one mutex so a
//! console reconfiguration is never observed half-done by an emitting thread.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::console::ConsoleTarget;
use crate::error::Result;
use crate::record::Record;
use crate::severity::Severity;
use crate::sink::{Sink, SinkKind};

/// Suffix of the standard log file
pub const LOG_FILE_SUFFIX: &str = ".log";

/// Suffix of the machine-parseable log file
pub const MACHINE_LOG_FILE_SUFFIX: &str = ".fitsFormat.log";

struct LoggerState {
    gate: Severity,
    sinks: Vec<Sink>,
}

/// A named logger with independently filtered sinks
pub struct Logger {
    name: String,
    log_dir: PathBuf,
    console: Arc<dyn ConsoleTarget>,
    state: Mutex<LoggerState>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("gate", &state.gate)
            .field("sinks", &state.sinks)
            .finish()
    }
}

impl Logger {
    /// Build a logger with the standard file sink (capturing everything) and
    /// a console sink at `console_threshold`
    pub(crate) fn new(
        name: &str,
        log_dir: &Path,
        gate: Severity,
        console_threshold: Severity,
        console: Arc<dyn ConsoleTarget>,
    ) -> Result<Self> {
        let file = Sink::file(
            log_dir.join(format!("{name}{LOG_FILE_SUFFIX}")),
            Severity::NotSet,
        )?;
        let stream = Sink::console(console_threshold, console.as_ref());

        Ok(Self {
            name: name.to_string(),
            log_dir: log_dir.to_path_buf(),
            console,
            state: Mutex::new(LoggerState {
                gate,
                sinks: vec![file, stream],
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        // The sink list stays valid even if an emitting thread panicked.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the standard log file
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(format!("{}{LOG_FILE_SUFFIX}", self.name))
    }

    /// Path the machine-parseable sink writes to once attached
    pub fn machine_log_path(&self) -> PathBuf {
        self.log_dir
            .join(format!("{}{MACHINE_LOG_FILE_SUFFIX}", self.name))
    }

    /// Emit a message at `level`
    ///
    /// Returns the number of sinks that physically wrote the line; zero when
    /// the gate rejects the level.
    pub fn emit(&self, level: Severity, message: impl AsRef<str>) -> Result<usize> {
        let mut state = self.lock();
        if state.gate.rank() > level.rank() {
            return Ok(0);
        }

        let record = Record::new(&self.name, level, message.as_ref());
        let mut written = 0;
        for sink in state.sinks.iter_mut() {
            if sink.write(&record)? {
                written += 1;
            }
        }
        Ok(written)
    }

    /// Emit at a level given by name, failing on unknown names
    pub fn emit_named(&self, level: &str, message: impl AsRef<str>) -> Result<usize> {
        let level: Severity = level.parse()?;
        self.emit(level, message)
    }

    /// Replace the console sink with one at `threshold`
    ///
    /// File sinks keep their thresholds and open handles. The new console
    /// sink goes after the remaining sinks; if none existed one is added.
    pub fn set_console_threshold(&self, threshold: Severity) {
        let mut state = self.lock();
        if let Some(index) = state
            .sinks
            .iter()
            .position(|s| s.kind() == SinkKind::Console)
        {
            state.sinks.remove(index);
        }
        state
            .sinks
            .push(Sink::console(threshold, self.console.as_ref()));

        tracing::debug!(logger = %self.name, %threshold, "console threshold changed");
    }

    /// Threshold of the console sink, if one is attached
    pub fn console_threshold(&self) -> Option<Severity> {
        self.lock()
            .sinks
            .iter()
            .find(|s| s.kind() == SinkKind::Console)
            .map(Sink::threshold)
    }

    /// Attach the machine-parseable file sink
    ///
    /// Does nothing if it is already attached.
    pub fn add_machine_sink(&self) -> Result<()> {
        let mut state = self.lock();
        if state
            .sinks
            .iter()
            .any(|s| s.kind() == SinkKind::MachineFile)
        {
            return Ok(());
        }

        let path = self.machine_log_path();
        let sink = Sink::machine_file(&path, Severity::NotSet)?;
        state.sinks.push(sink);

        tracing::debug!(logger = %self.name, path = %path.display(), "machine sink attached");
        Ok(())
    }

    pub fn gate(&self) -> Severity {
        self.lock().gate
    }

    /// Change the lowest severity this logger will consider
    pub fn set_gate(&self, gate: Severity) {
        self.lock().gate = gate;
    }

    /// Kinds of the attached sinks, in order
    pub fn sink_kinds(&self) -> Vec<SinkKind> {
        self.lock().sinks.iter().map(Sink::kind).collect()
    }
}
