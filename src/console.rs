//! Console targets
//!
//! A console sink asks its target for a fresh writer each time it is built,
//! so reconfiguring the console threshold never disturbs where output goes.
//! [`CaptureBuffer`] keeps console output in memory for inspection.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Source of writers for console sinks
pub trait ConsoleTarget: Send + Sync {
    /// Create a writer for a newly installed console sink
    fn make_writer(&self) -> Box<dyn Write + Send>;
}

/// The process's standard output stream
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl ConsoleTarget for Stdout {
    fn make_writer(&self) -> Box<dyn Write + Send> {
        Box::new(io::stdout())
    }
}

/// Thread-safe in-memory console
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Create an empty capture buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        self.bytes
            .lock()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default()
    }

    /// Captured output split into lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Discard captured output
    pub fn clear(&self) {
        if let Ok(mut bytes) = self.bytes.lock() {
            bytes.clear();
        }
    }
}

impl ConsoleTarget for CaptureBuffer {
    fn make_writer(&self) -> Box<dyn Write + Send> {
        Box::new(CaptureWriter {
            bytes: Arc::clone(&self.bytes),
        })
    }
}

/// Writer handed out by [`CaptureBuffer`]
struct CaptureWriter {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.bytes.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
