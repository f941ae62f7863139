use probe_model::Measurement;
use prometheus::{IntCounterVec, IntGauge, Opts, Registry};

use crate::{encode, error::MetricsError};

/// Self-metrics of the exporter process.
///
/// Cheap to clone; all clones feed the same registry.
#[derive(Clone)]
pub struct ExporterMetrics {
    registry: Registry,
    probes: IntCounterVec,
    scripts_run: IntCounterVec,
    reloads: IntCounterVec,
    loaded: IntGauge,
}

impl ExporterMetrics {
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let probes = IntCounterVec::new(
            Opts::new("script_exporter_probes_total", "Probe requests by result."),
            &["result"],
        )?;
        let scripts_run = IntCounterVec::new(
            Opts::new("script_exporter_scripts_run_total", "Script executions by success."),
            &["success"],
        )?;
        let reloads = IntCounterVec::new(
            Opts::new("script_exporter_config_reloads_total", "Configuration reloads by result."),
            &["result"],
        )?;
        let loaded = IntGauge::new(
            "script_exporter_scripts_loaded",
            "Number of scripts in the active configuration.",
        )?;

        registry.register(Box::new(probes.clone()))?;
        registry.register(Box::new(scripts_run.clone()))?;
        registry.register(Box::new(reloads.clone()))?;
        registry.register(Box::new(loaded.clone()))?;

        Ok(Self {
            registry,
            probes,
            scripts_run,
            reloads,
            loaded,
        })
    }

    /// Count a served probe and the scripts it ran.
    pub fn observe_probe(&self, measurements: &[Measurement]) {
        self.probes.with_label_values(&["ok"]).inc();
        for m in measurements {
            let label = if m.success { "true" } else { "false" };
            self.scripts_run.with_label_values(&[label]).inc();
        }
    }

    /// Count a probe rejected before anything ran.
    pub fn observe_rejected_probe(&self) {
        self.probes.with_label_values(&["bad_request"]).inc();
    }

    pub fn observe_reload(&self, ok: bool) {
        let label = if ok { "success" } else { "failure" };
        self.reloads.with_label_values(&[label]).inc();
    }

    pub fn set_scripts_loaded(&self, count: usize) {
        self.loaded.set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Text exposition of the exporter registry.
    pub fn render(&self) -> Result<String, MetricsError> {
        encode(&self.registry)
    }
}
