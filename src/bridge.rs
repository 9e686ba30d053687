//! Forwarding `tracing` events into a [`Logger`]
//!
//! Lets pipeline code written against `tracing` macros land in the tiered
//! log files. The severity comes from a `severity` field when present
//! (`tracing::info!(severity = "PRIMINFO", "...")`), otherwise from the
//! event's level.

use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::logger::Logger;
use crate::severity::Severity;

/// Events from this crate are not forwarded, so a logger's own diagnostics
/// cannot loop back into it
const OWN_TARGET: &str = "tierlog";

/// Whether `target` is this crate or one of its modules
fn is_own_target(target: &str) -> bool {
    match target.strip_prefix(OWN_TARGET) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

/// A `tracing_subscriber` layer writing events to a [`Logger`]
#[derive(Debug, Clone)]
pub struct SeverityLayer {
    logger: Arc<Logger>,
}

impl SeverityLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

/// Collects the message, an optional severity override and any other fields
#[derive(Default)]
struct EventVisitor {
    message: String,
    severity: Option<Severity>,
    fields: Vec<String>,
}

impl EventVisitor {
    fn into_line(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.join(" ")
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "severity" => match value.parse() {
                Ok(level) => self.severity = Some(level),
                Err(_) => self.fields.push(format!("severity={value}")),
            },
            name => self.fields.push(format!("{name}={value}")),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "severity" => {
                let raw = format!("{value:?}");
                match raw.trim_matches('"').parse() {
                    Ok(level) => self.severity = Some(level),
                    Err(_) => self.fields.push(format!("severity={raw}")),
                }
            }
            name => self.fields.push(format!("{name}={value:?}")),
        }
    }
}

impl<S: Subscriber> Layer<S> for SeverityLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let level = visitor
            .severity
            .unwrap_or_else(|| Severity::from(*metadata.level()));

        // Nowhere to report a failing sink from inside the subscriber.
        let _ = self.logger.emit(level, visitor.into_line());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use crate::console::CaptureBuffer;
    use crate::record::Record;
    use crate::registry::LoggerRegistry;
    use tempfile::TempDir;
    use tracing_subscriber::layer::SubscriberExt;

    fn parsed_lines(logger: &Logger) -> Vec<(Severity, String)> {
        std::fs::read_to_string(logger.log_path())
            .unwrap()
            .lines()
            .map(|l| {
                let parsed = Record::parse_standard(l).unwrap();
                (parsed.severity, parsed.message)
            })
            .collect()
    }

    #[test]
    fn test_events_forwarded_with_mapped_levels() {
        let temp_dir = TempDir::new().unwrap();
        let console = CaptureBuffer::new();
        let registry = LoggerRegistry::with_console(
            LoggingConfig::with_log_dir(temp_dir.path()),
            Arc::new(console.clone()),
        );
        let log = registry.get_or_create("bridge", Severity::Info).unwrap();

        let subscriber = tracing_subscriber::registry().with(SeverityLayer::new(Arc::clone(&log)));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "pipeline", "detector saturated");
            tracing::info!(target: "pipeline", severity = "PRIMINFO", "extracting cube");
            tracing::debug!(target: "pipeline", frame = 3, "reading");
            tracing::error!(target: "pipeline", severity = "LOUD", "bad override");
            tracing::info!(target: "tierlog::registry", "skipped");
            tracing::info!(target: "tierlog", "skipped too");
            tracing::warn!(target: "tierlog_pipeline::reduce", "user crate event");
        });

        let lines = parsed_lines(&log);
        assert_eq!(
            lines,
            vec![
                (Severity::Warning, "detector saturated".to_string()),
                (Severity::PrimInfo, "extracting cube".to_string()),
                (Severity::Debug, "reading frame=3".to_string()),
                (Severity::Error, "bad override severity=LOUD".to_string()),
                (Severity::Warning, "user crate event".to_string()),
            ]
        );
        assert_eq!(
            console.lines(),
            vec![
                "detector saturated",
                "extracting cube",
                "bad override severity=LOUD",
                "user crate event",
            ]
        );
    }

    #[test]
    fn test_is_own_target() {
        assert!(is_own_target("tierlog"));
        assert!(is_own_target("tierlog::logger"));
        assert!(!is_own_target("tierlog_pipeline::reduce"));
        assert!(!is_own_target("tierlogger"));
        assert!(!is_own_target("pipeline::tierlog"));
    }
}
