use std::{fmt, str::FromStr};

use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

/// Validated filter directive (`info`, `probe.exec=debug,warn`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(directive: impl Into<String>) -> Result<Self, LoggerError> {
        let directive = directive.into();
        let trimmed = directive.trim();
        if trimmed.is_empty() {
            return Err(LoggerError::InvalidLogLevel(directive));
        }
        EnvFilter::try_new(trimmed).map_err(|_| LoggerError::InvalidLogLevel(directive.clone()))?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn to_filter(&self) -> Result<EnvFilter, LoggerError> {
        EnvFilter::try_new(&self.0).map_err(|_| LoggerError::InvalidLogLevel(self.0.clone()))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_levels_and_directives() {
        assert_eq!(LoggerLevel::new("debug").unwrap().as_str(), "debug");
        assert_eq!(
            LoggerLevel::new(" probe.exec=trace,warn ").unwrap().as_str(),
            "probe.exec=trace,warn"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            LoggerLevel::new(""),
            Err(LoggerError::InvalidLogLevel(_))
        ));
        assert!(matches!(
            "probe.exec=notalevel".parse::<LoggerLevel>(),
            Err(LoggerError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn default_is_info() {
        assert_eq!(LoggerLevel::default().to_string(), "info");
    }
}
