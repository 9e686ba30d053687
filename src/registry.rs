//! Logger registry
//!
//! Maps logger names to shared [`Logger`] instances with get-or-create
//! semantics. A registry is an ordinary value: build one at startup and pass
//! it to whatever needs a logger.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::LoggingConfig;
use crate::console::{ConsoleTarget, Stdout};
use crate::error::{LogError, Result};
use crate::logger::Logger;
use crate::record::FIELD_SEPARATOR;
use crate::severity::Severity;

/// Get-or-create store of named loggers
pub struct LoggerRegistry {
    config: LoggingConfig,
    console: Arc<dyn ConsoleTarget>,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("config", &self.config)
            .field("loggers", &self.names())
            .finish()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new(LoggingConfig::default())
    }
}

/// Logger names become file names and a field of every standard log line,
/// so they must not contain path or field separators
fn validate_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0', '\n', '\r'])
        || name.contains(FIELD_SEPARATOR);
    if bad {
        return Err(LogError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl LoggerRegistry {
    /// Create a registry whose console sinks write to stdout
    pub fn new(config: LoggingConfig) -> Self {
        Self::with_console(config, Arc::new(Stdout))
    }

    /// Create a registry with a custom console target
    pub fn with_console(config: LoggingConfig, console: Arc<dyn ConsoleTarget>) -> Self {
        Self {
            config,
            console,
            loggers: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Logger>>> {
        self.loggers.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Return the logger called `name`, building it on first use
    ///
    /// `console_threshold` only applies when the logger is created; an
    /// existing logger is returned unchanged.
    pub fn get_or_create(&self, name: &str, console_threshold: Severity) -> Result<Arc<Logger>> {
        // Held across construction so racing callers share one instance.
        let mut loggers = self.lock();
        if let Some(logger) = loggers.get(name) {
            return Ok(Arc::clone(logger));
        }

        validate_name(name)?;
        let logger = Logger::new(
            name,
            &self.config.log_dir,
            self.config.gate,
            console_threshold,
            Arc::clone(&self.console),
        )?;
        if self.config.machine_sink {
            logger.add_machine_sink()?;
        }

        let logger = Arc::new(logger);
        loggers.insert(name.to_string(), Arc::clone(&logger));

        tracing::info!(
            logger = name,
            path = %logger.log_path().display(),
            console = %console_threshold,
            "logger created"
        );
        Ok(logger)
    }

    /// [`get_or_create`](Self::get_or_create) with the configured console level
    pub fn get_or_create_default(&self, name: &str) -> Result<Arc<Logger>> {
        self.get_or_create(name, self.config.console_level)
    }

    /// Look up an existing logger
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.lock().get(name).cloned()
    }

    /// Change the console threshold of a registered logger
    pub fn set_console_threshold(&self, name: &str, threshold: Severity) -> Result<()> {
        let logger = self
            .get(name)
            .ok_or_else(|| LogError::UnknownLogger(name.to_string()))?;
        logger.set_console_threshold(threshold);
        Ok(())
    }

    /// Names of all registered loggers, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
