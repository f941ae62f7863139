use std::sync::Arc;

use async_trait::async_trait;
use probe_model::{Measurement, ScriptSpec};

use crate::error::ApiError;

/// Probe API backend.
///
/// This trait abstracts the backend implementation, allowing users to:
/// - Use the provided `ProbeService`
/// - Wrap it with additional logic (auth, rate limiting, caching, etc.)
#[async_trait]
pub trait ProbeHandler: Send + Sync + 'static {
    /// Run the scripts selected by `name` and/or `pattern` and wait for all of them.
    async fn probe(&self, name: &str, pattern: &str) -> Result<Vec<Measurement>, ApiError>;

    /// Scripts of the active configuration, in merge order.
    async fn scripts(&self) -> Result<Vec<Arc<ScriptSpec>>, ApiError>;

    /// Canonical YAML of the active configuration.
    async fn config(&self) -> Result<String, ApiError>;

    /// Re-read the configuration sources and swap the active configuration.
    ///
    /// Returns the number of scripts loaded. On error the active configuration is kept.
    async fn reload(&self) -> Result<usize, ApiError>;

    /// Text exposition of the exporter's own metrics.
    async fn exporter_metrics(&self) -> Result<String, ApiError>;
}
