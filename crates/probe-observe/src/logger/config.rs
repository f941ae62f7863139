use std::io::IsTerminal;

use crate::logger::{format::LoggerFormat, level::LoggerLevel};

/// Settings for the process-wide tracing subscriber.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    /// Print the event target (`probe.exec`, `probe.api`, ...).
    pub with_targets: bool,
    /// ANSI colors; only honored by the text format.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: std::io::stdout().is_terminal(),
        }
    }
}
