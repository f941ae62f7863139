//! Prometheus exposition for script measurements.
//!
//! Two independent pieces:
//! - [`render_measurements`] turns the measurements of one probe into a text exposition,
//!   built in a fresh [`Registry`] so nothing leaks between requests.
//! - [`ExporterMetrics`] is a long-lived registry describing the exporter itself.
//!
//! ## Probe metrics
//! - `script_success{script}` - Gauge, `1` on success, `0` otherwise
//! - `script_duration_seconds{script}` - Gauge
//!
//! ## Exporter metrics
//! - `script_exporter_probes_total{result}` - Counter
//! - `script_exporter_scripts_run_total{success}` - Counter
//! - `script_exporter_config_reloads_total{result}` - Counter
//! - `script_exporter_scripts_loaded` - Gauge
//!
//! ## HTTP Server
//! This crate does NOT serve anything. The caller decides where the encoded text goes:
//!
//! ```rust,ignore
//! let body = probe_prometheus::render_measurements(&measurements)?;
//! Response::builder()
//!     .header("Content-Type", probe_prometheus::CONTENT_TYPE)
//!     .body(body.into())
//! ```

mod error;
pub use error::MetricsError;

mod exporter;
pub use exporter::ExporterMetrics;

mod probe;
pub use probe::render_measurements;

pub use prometheus::{Encoder, Registry, TextEncoder};

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

fn encode(registry: &Registry) -> Result<String, MetricsError> {
    let families = registry.gather();
    let mut buf = Vec::new();
    TextEncoder::new().encode(&families, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
