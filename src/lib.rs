//! tierlog - tiered severity logging for layered data pipelines
//!
//! Loggers are obtained by name from a [`LoggerRegistry`], which hands out
//! one shared [`Logger`] per name. Each logger writes every message to
//! `<name>.log`, echoes messages at or above its console threshold to the
//! console, and can optionally keep a machine-parseable
//! `<name>.fitsFormat.log`.
//!
//! ```no_run
//! use tierlog::{LoggerRegistry, LoggingConfig, Severity};
//!
//! # fn main() -> tierlog::Result<()> {
//! let registry = LoggerRegistry::new(LoggingConfig::default());
//! let log = registry.get_or_create("pipeline", Severity::Info)?;
//! log.emit(Severity::MainInfo, "starting reduction")?;
//! log.emit(Severity::ToolDebug, "file only")?;
//! log.set_console_threshold(Severity::Critical);
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod config;
pub mod console;
pub mod error;
pub mod host;
pub mod logger;
pub mod record;
pub mod registry;
pub mod severity;
pub mod sink;

pub use bridge::SeverityLayer;
pub use config::LoggingConfig;
pub use console::{CaptureBuffer, ConsoleTarget, Stdout};
pub use error::{LogError, Result};
pub use host::{log_system_info, HostInfo};
pub use logger::Logger;
pub use record::{Layout, ParsedLine, Record};
pub use registry::LoggerRegistry;
pub use severity::{Severity, Tier};
pub use sink::{Sink, SinkKind};
