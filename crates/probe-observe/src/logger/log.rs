use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, fmt::time::OffsetTime, layer::Layered, layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

/// Subscriber stack every output layer sits on: the registry behind the level filter.
type Filtered = Layered<EnvFilter, Registry>;
type Output = Box<dyn Layer<Filtered> + Send + Sync>;

/// Build the output layer for `cfg.format` and install it behind `cfg.level`.
pub(crate) fn install(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = cfg.level.to_filter()?;
    let output = output_layer(cfg)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(|e| {
            if tracing::dispatcher::has_been_set() {
                LoggerError::AlreadyInitialized
            } else {
                LoggerError::InitializationFailed(e.to_string())
            }
        })
}

fn output_layer(cfg: &LoggerConfig) -> Result<Output, LoggerError> {
    let layer: Output = match cfg.format {
        LoggerFormat::Text => fmt::layer()
            .with_ansi(cfg.use_color)
            .with_target(cfg.with_targets)
            .with_timer(local_rfc3339())
            .boxed(),
        // Span fields carry the probe run id into every event line.
        LoggerFormat::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_current_span(true)
            .with_target(cfg.with_targets)
            .with_timer(local_rfc3339())
            .boxed(),
        LoggerFormat::Journald => journald_layer()?,
    };
    Ok(layer)
}

/// Local-offset RFC 3339 timestamps; UTC when the offset cannot be determined.
fn local_rfc3339() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald_layer() -> Result<Output, LoggerError> {
    tracing_journald::layer()
        .map(Layer::boxed)
        .map_err(|e| LoggerError::InitializationFailed(format!("journald: {e}")))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald_layer() -> Result<Output, LoggerError> {
    Err(LoggerError::JournaldNotSupported)
}
