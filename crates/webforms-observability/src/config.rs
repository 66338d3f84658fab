//! Logging section of the engine configuration.

use serde::{Deserialize, Serialize};
use webforms_core::RequestId;

use crate::logging::{LogFormat, LogLevel, StructuredLogger};

/// Level and format for per-request loggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Json,
        }
    }
}

impl ObservabilityConfig {
    /// Create a logger for one request using these settings.
    pub fn logger(&self, request_id: RequestId) -> StructuredLogger {
        StructuredLogger::new(request_id)
            .with_min_level(self.log_level)
            .with_format(self.log_format)
    }
}
