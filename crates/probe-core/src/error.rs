use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or merging configuration sources.
///
/// Any of these aborts the whole merge; callers never see a partial result.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration sources given")]
    NoSources,

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("failed to serialize merged configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ConfigError::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Request-time selection failures.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("name or pattern required")]
    MissingSelector,

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
