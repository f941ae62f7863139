use std::{
    process::ExitStatus,
    sync::Arc,
    time::{Duration, Instant},
};

use probe_model::{Measurement, ScriptOutcome, ScriptSpec};
use tracing::{debug, error, trace, warn};

use crate::{
    config::ExecConfig,
    error::ExecError,
    util::{kill_tree, shell_command},
};

/// Runs scripts as subprocesses and measures them.
///
/// A batch fans out one tokio task per script and joins on all of them. Script failures
/// of any kind come back as unsuccessful measurements; `run` itself cannot fail.
#[derive(Debug, Clone, Default)]
pub struct ScriptRunner {
    cfg: Arc<ExecConfig>,
}

impl ScriptRunner {
    pub fn new(cfg: ExecConfig) -> Self {
        Self { cfg: Arc::new(cfg) }
    }

    pub fn config(&self) -> &ExecConfig {
        &self.cfg
    }

    /// Run every script concurrently and wait for all of them.
    ///
    /// Returns exactly one measurement per input script, in input order.
    pub async fn run(&self, scripts: Vec<Arc<ScriptSpec>>) -> Vec<Measurement> {
        let handles: Vec<_> = scripts
            .into_iter()
            .map(|spec| {
                let cfg = Arc::clone(&self.cfg);
                let task_spec = Arc::clone(&spec);
                let started = Instant::now();
                let handle = tokio::spawn(async move { run_script(task_spec, &cfg).await });
                (spec, started, handle)
            })
            .collect();

        let mut measurements = Vec::with_capacity(handles.len());
        for (spec, started, handle) in handles {
            match handle.await {
                Ok(m) => measurements.push(m),
                Err(e) => {
                    let err = ExecError::Join(e.to_string());
                    error!(target: "probe.exec", script = %spec.name, error = %err, "script task failed");
                    measurements.push(Measurement::new(spec, ScriptOutcome::Lost, started.elapsed()));
                }
            }
        }
        measurements
    }

    /// Run a single script on the current task.
    pub async fn run_one(&self, spec: Arc<ScriptSpec>) -> Measurement {
        run_script(spec, &self.cfg).await
    }
}

async fn run_script(spec: Arc<ScriptSpec>, cfg: &ExecConfig) -> Measurement {
    let (outcome, elapsed) = execute(&spec, cfg).await;
    debug!(
        target: "probe.exec",
        script = %spec.name,
        outcome = outcome.as_str(),
        duration = elapsed.as_secs_f64(),
        "script finished"
    );
    Measurement::new(spec, outcome, elapsed)
}

async fn execute(spec: &ScriptSpec, cfg: &ExecConfig) -> (ScriptOutcome, Duration) {
    let deadline = cfg.deadline_for(spec);
    let started = Instant::now();

    let mut child = match shell_command(&cfg.shell, &spec.command).spawn() {
        Ok(child) => child,
        Err(e) => {
            let err = ExecError::Spawn(e);
            warn!(target: "probe.exec", script = %spec.name, error = %err, "script not started");
            return (ScriptOutcome::SpawnFailed, started.elapsed());
        }
    };
    trace!(target: "probe.exec", script = %spec.name, pid = ?child.id(), ?deadline, "spawned");

    let Some(deadline) = deadline else {
        let status = child.wait().await;
        let elapsed = started.elapsed();
        return (exit_outcome(&spec.name, status), elapsed);
    };

    tokio::select! {
        status = child.wait() => {
            let elapsed = started.elapsed();
            (exit_outcome(&spec.name, status), elapsed)
        }
        _ = tokio::time::sleep(deadline) => {
            let elapsed = started.elapsed();
            debug!(target: "probe.exec", script = %spec.name, ?deadline, "deadline expired; killing process group");
            if let Err(e) = kill_tree(&mut child).await {
                let err = ExecError::Kill(e);
                warn!(target: "probe.exec", script = %spec.name, error = %err, "failed to kill timed out script");
            }
            (ScriptOutcome::TimedOut, elapsed)
        }
    }
}

fn exit_outcome(name: &str, status: std::io::Result<ExitStatus>) -> ScriptOutcome {
    match status {
        Ok(status) => match status.code() {
            Some(code) => ScriptOutcome::Exited { code },
            None => ScriptOutcome::Signaled,
        },
        Err(e) => {
            let err = ExecError::Wait(e);
            warn!(target: "probe.exec", script = name, error = %err, "lost track of script");
            ScriptOutcome::Lost
        }
    }
}
