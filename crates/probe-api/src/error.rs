use probe_core::{ConfigError, FilterError};
use probe_prometheus::MetricsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Whether the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::Filter(_))
    }
}

#[cfg(feature = "http")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        if status.is_server_error() {
            tracing::error!(target: "probe.api", error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
