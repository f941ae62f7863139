use thiserror::Error;

/// Logger setup failures, reported before any other startup work.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log format `{0}` (expected: text|json|journald)")]
    InvalidFormat(String),
    #[error("journald logging requires Linux and the `journald` feature")]
    JournaldNotSupported,
    #[error("global logger is already installed")]
    AlreadyInitialized,
    #[error("logger setup failed: {0}")]
    InitializationFailed(String),
    #[error("invalid log level or filter directive `{0}`")]
    InvalidLogLevel(String),
}
