use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("exposition is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
