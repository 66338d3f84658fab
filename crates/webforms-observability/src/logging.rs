//! Per-request structured logging.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use webforms_core::{LifecyclePhase, RequestId};

/// Severity, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How entries are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// `level request_id page/route: message key=value (elapsed)`.
    Human,
}

/// Destination for formatted lines.
#[derive(Debug, Clone, Default)]
pub enum LogOutput {
    #[default]
    Stderr,
    /// Collect lines in memory.
    Memory(Arc<Mutex<Vec<String>>>),
}

impl LogOutput {
    /// Fresh in-memory output and a handle to its lines.
    pub fn memory() -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (LogOutput::Memory(Arc::clone(&lines)), lines)
    }

    fn write_line(&self, line: String) {
        match self {
            LogOutput::Stderr => eprintln!("{}", line),
            LogOutput::Memory(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
            }
        }
    }
}

/// One emitted record.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<&'static str>,
    /// Extra fields, written in key order.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    /// Microseconds since the logger was created.
    pub elapsed_us: u64,
}

impl LogEntry {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    pub fn to_human(&self) -> String {
        let mut line = format!("{:<5} {}", self.level, self.request_id);

        match (&self.page, &self.route) {
            (Some(page), Some(route)) => line.push_str(&format!(" {}/{}", page, route)),
            (Some(page), None) => line.push_str(&format!(" {}", page)),
            (None, Some(route)) => line.push_str(&format!(" /{}", route)),
            (None, None) => {}
        }
        if let Some(phase) = self.phase {
            line.push_str(&format!(" [{}]", phase));
        }

        line.push_str(": ");
        line.push_str(&self.message);
        for (key, value) in &self.fields {
            match value {
                Value::String(s) => line.push_str(&format!(" {}={}", key, s)),
                other => line.push_str(&format!(" {}={}", key, other)),
            }
        }
        line.push_str(&format!(" ({}us)", self.elapsed_us));
        line
    }
}

/// Logger scoped to one request.
///
/// Carries the request ID and, once known, the page and matched route, so
/// every entry of a request can be correlated. Entries are built with
/// [`LogBuilder`] and written when [`LogBuilder::emit`] is called.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    request_id: RequestId,
    page: Option<String>,
    route: Option<String>,
    created: Instant,
    min_level: LogLevel,
    format: LogFormat,
    output: LogOutput,
}

impl StructuredLogger {
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            page: None,
            route: None,
            created: Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::default(),
            output: LogOutput::default(),
        }
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Whether entries at `level` are written.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Start an entry at any level.
    #[must_use = "call .emit() to write the entry"]
    pub fn event(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            phase: None,
            fields: BTreeMap::new(),
        }
    }

    #[must_use = "call .emit() to write the entry"]
    pub fn debug(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.event(LogLevel::Debug, message)
    }

    #[must_use = "call .emit() to write the entry"]
    pub fn info(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.event(LogLevel::Info, message)
    }

    #[must_use = "call .emit() to write the entry"]
    pub fn warn(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.event(LogLevel::Warn, message)
    }

    #[must_use = "call .emit() to write the entry"]
    pub fn error(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.event(LogLevel::Error, message)
    }

    fn write(&self, entry: LogEntry) {
        let line = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };
        self.output.write_line(line);
    }
}

/// Entry under construction.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    phase: Option<&'static str>,
    fields: BTreeMap<String, Value>,
}

impl LogBuilder<'_> {
    /// Tag the entry with the lifecycle phase it belongs to.
    pub fn phase(mut self, phase: LifecyclePhase) -> Self {
        self.phase = Some(phase.as_str());
        self
    }

    /// Attach a field. Values that fail to serialize are recorded as null.
    pub fn field(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Attach a duration in whole milliseconds.
    pub fn duration(self, key: &str, duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.field(key, millis)
    }

    /// Write the entry if its level is enabled.
    pub fn emit(self) {
        let logger = self.logger;
        if !logger.enabled(self.level) {
            return;
        }

        logger.write(LogEntry {
            level: self.level,
            message: self.message,
            request_id: logger.request_id.to_string(),
            page: logger.page.clone(),
            route: logger.route.clone(),
            phase: self.phase,
            fields: self.fields,
            elapsed_us: u64::try_from(logger.created.elapsed().as_micros()).unwrap_or(u64::MAX),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger() -> (StructuredLogger, Arc<Mutex<Vec<String>>>) {
        let (output, lines) = LogOutput::memory();
        let logger = StructuredLogger::new(RequestId::from_string("req-1")).with_output(output);
        (logger, lines)
    }

    #[test]
    fn test_json_entry_carries_request_context() {
        let (logger, lines) = logger();
        let logger = logger.with_page("HomePage").with_route("Home");

        logger.info("rendered").emit();

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        let value: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["level"], "info");
        assert_eq!(value["message"], "rendered");
        assert_eq!(value["request_id"], "req-1");
        assert_eq!(value["page"], "HomePage");
        assert_eq!(value["route"], "Home");
        assert!(value.get("phase").is_none());
    }

    #[test]
    fn test_min_level() {
        let (logger, lines) = logger();

        logger.debug("hidden").emit();
        logger.warn("shown").emit();

        assert_eq!(lines.lock().unwrap().len(), 1);
        assert!(!logger.enabled(LogLevel::Trace));
        assert!(logger.enabled(LogLevel::Error));
    }

    #[test]
    fn test_fields_and_phase() {
        let (logger, lines) = logger();

        logger
            .error("phase failed")
            .phase(LifecyclePhase::Load)
            .field("status", 500)
            .field("partial", false)
            .field("error", "boom")
            .duration("elapsed_ms", Duration::from_millis(12))
            .emit();

        let value: Value = serde_json::from_str(&lines.lock().unwrap()[0]).unwrap();
        assert_eq!(value["phase"], "load");
        assert_eq!(value["status"], 500);
        assert_eq!(value["partial"], false);
        assert_eq!(value["error"], "boom");
        assert_eq!(value["elapsed_ms"], 12);
    }

    #[test]
    fn test_human_format() {
        let (logger, lines) = logger();
        let logger = logger
            .with_format(LogFormat::Human)
            .with_page("HomePage");

        logger
            .info("done")
            .phase(LifecyclePhase::PreRender)
            .field("b", 2)
            .field("a", "x")
            .emit();

        let line = lines.lock().unwrap()[0].clone();
        assert!(
            line.starts_with("info  req-1 HomePage [pre_render]: done a=x b=2 ("),
            "{}",
            line
        );
        assert!(line.ends_with("us)"));
    }

    #[test]
    fn test_level_names() {
        let level: LogLevel = serde_json::from_str(r#""warn""#).unwrap();
        assert_eq!(level, LogLevel::Warn);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }
}
