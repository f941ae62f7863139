use std::sync::Arc;

use async_trait::async_trait;
use probe_core::{ConfigSources, ScriptStore, Selector};
use probe_exec::ScriptRunner;
use probe_model::{Measurement, ScriptSpec};
use probe_prometheus::ExporterMetrics;
use tokio::sync::Mutex;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::handler::ProbeHandler;

/// Ready-to-use [`ProbeHandler`] over a script store, a runner and the configured sources.
pub struct ProbeService {
    store: ScriptStore,
    runner: ScriptRunner,
    sources: ConfigSources,
    metrics: ExporterMetrics,
    reload_lock: Mutex<()>,
}

impl ProbeService {
    pub fn new(
        store: ScriptStore,
        runner: ScriptRunner,
        sources: ConfigSources,
        metrics: ExporterMetrics,
    ) -> Self {
        metrics.set_scripts_loaded(store.len());
        Self {
            store,
            runner,
            sources,
            metrics,
            reload_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &ScriptStore {
        &self.store
    }

    pub fn sources(&self) -> &ConfigSources {
        &self.sources
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.metrics
    }
}

#[async_trait]
impl ProbeHandler for ProbeService {
    async fn probe(&self, name: &str, pattern: &str) -> Result<Vec<Measurement>, ApiError> {
        let run_id = Uuid::new_v4();
        let span = info_span!(target: "probe.api", "probe", %run_id, selector.name = name, selector.pattern = pattern);

        async {
            let selector = match Selector::new(name, pattern) {
                Ok(selector) => selector,
                Err(e) => {
                    self.metrics.observe_rejected_probe();
                    debug!(target: "probe.api", error = %e, "probe rejected");
                    return Err(ApiError::from(e));
                }
            };

            let snapshot = self.store.snapshot();
            let selected = selector.select(snapshot.scripts());
            debug!(target: "probe.api", scripts = selected.len(), "running scripts");

            let measurements = self.runner.run(selected).await;
            self.metrics.observe_probe(&measurements);

            let failed = measurements.iter().filter(|m| !m.success).count();
            debug!(target: "probe.api", total = measurements.len(), failed, "probe finished");
            Ok(measurements)
        }
        .instrument(span)
        .await
    }

    async fn scripts(&self) -> Result<Vec<Arc<ScriptSpec>>, ApiError> {
        Ok(self.store.snapshot().scripts().to_vec())
    }

    async fn config(&self) -> Result<String, ApiError> {
        Ok(self.store.snapshot().canonical().to_string())
    }

    async fn reload(&self) -> Result<usize, ApiError> {
        let _guard = self.reload_lock.lock().await;

        let sources = self.sources.clone();
        let loaded = tokio::task::spawn_blocking(move || sources.load())
            .await
            .map_err(|e| ApiError::Internal(format!("reload task: {e}")))?;

        match loaded {
            Ok(snapshot) => {
                let count = snapshot.len();
                self.store.replace(snapshot);
                self.metrics.observe_reload(true);
                self.metrics.set_scripts_loaded(count);
                info!(target: "probe.api", scripts = count, "configuration reloaded");
                Ok(count)
            }
            Err(e) => {
                self.metrics.observe_reload(false);
                warn!(target: "probe.api", error = %e, "configuration reload failed; keeping previous");
                Err(ApiError::from(e))
            }
        }
    }

    async fn exporter_metrics(&self) -> Result<String, ApiError> {
        Ok(self.metrics.render()?)
    }
}

#[cfg(all(test, target_family = "unix"))]
mod tests {
    use std::fs;

    use probe_core::{ConfigError, FilterError};

    use super::*;

    const CONFIG: &str = "
scripts:
  - name: success
    script: exit 0
    timeout: 1
  - name: failure
    script: exit 1
    timeout: 1
  - name: timeout
    script: sleep 5
    timeout: 2
";

    fn service(dir: &std::path::Path) -> ProbeService {
        let path = dir.join("scripts.yml");
        fs::write(&path, CONFIG).unwrap();

        let sources = ConfigSources::new([path]);
        let store = ScriptStore::with_snapshot(sources.load().unwrap());
        ProbeService::new(
            store,
            ScriptRunner::default(),
            sources,
            ExporterMetrics::new().unwrap(),
        )
    }

    #[tokio::test]
    async fn probe_requires_selector() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());

        let err = svc.probe("", "").await.unwrap_err();
        assert!(matches!(err, ApiError::Filter(FilterError::MissingSelector)));
    }

    #[tokio::test]
    async fn probe_runs_selected_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());

        let measurements = svc.probe("success", "^fail").await.unwrap();
        let names: Vec<_> = measurements.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["success", "failure"]);
        assert!(measurements[0].success);
        assert!(!measurements[1].success);
    }

    #[tokio::test]
    async fn reload_swaps_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());
        assert_eq!(svc.store().len(), 3);

        fs::write(
            dir.path().join("scripts.yml"),
            "scripts:\n  - name: only\n    script: exit 0\n",
        )
        .unwrap();

        assert_eq!(svc.reload().await.unwrap(), 1);
        assert_eq!(svc.config().await.unwrap(), "scripts:\n- name: only\n  script: exit 0\n  timeout: 0\n");
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());
        let before = svc.config().await.unwrap();

        fs::write(dir.path().join("scripts.yml"), "scripts: [[[").unwrap();

        let err = svc.reload().await.unwrap_err();
        assert!(matches!(err, ApiError::Config(ConfigError::Parse { .. })));
        assert_eq!(svc.config().await.unwrap(), before);
        assert_eq!(svc.scripts().await.unwrap().len(), 3);
    }
}
