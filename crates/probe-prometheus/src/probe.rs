use probe_model::Measurement;
use prometheus::{GaugeVec, Opts, Registry};

use crate::{encode, error::MetricsError};

const SCRIPT_LABEL: &str = "script";

/// Render the measurements of one probe as a Prometheus text exposition.
///
/// Scripts sharing a name collapse into one series; the last measurement wins.
pub fn render_measurements(measurements: &[Measurement]) -> Result<String, MetricsError> {
    let registry = Registry::new();

    let success = GaugeVec::new(
        Opts::new("script_success", "Script exit status (0 = error, 1 = success)."),
        &[SCRIPT_LABEL],
    )?;
    let duration = GaugeVec::new(
        Opts::new("script_duration_seconds", "Script execution time, in seconds."),
        &[SCRIPT_LABEL],
    )?;
    registry.register(Box::new(success.clone()))?;
    registry.register(Box::new(duration.clone()))?;

    for m in measurements {
        let value = if m.success { 1.0 } else { 0.0 };
        success.with_label_values(&[m.name()]).set(value);
        duration.with_label_values(&[m.name()]).set(m.duration);
    }

    encode(&registry)
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use probe_model::{ScriptOutcome, ScriptSpec};

    use super::*;

    fn measurement(name: &str, outcome: ScriptOutcome, millis: u64) -> Measurement {
        Measurement::new(
            Arc::new(ScriptSpec::new(name, "true")),
            outcome,
            Duration::from_millis(millis),
        )
    }

    #[test]
    fn renders_success_and_duration_per_script() {
        let text = render_measurements(&[
            measurement("ok", ScriptOutcome::Exited { code: 0 }, 500),
            measurement("bad", ScriptOutcome::TimedOut, 2000),
        ])
        .unwrap();

        assert!(text.contains("# TYPE script_success gauge"));
        assert!(text.contains("# TYPE script_duration_seconds gauge"));
        assert!(text.contains(r#"script_success{script="ok"} 1"#));
        assert!(text.contains(r#"script_success{script="bad"} 0"#));
        assert!(text.contains(r#"script_duration_seconds{script="ok"} 0.5"#));
        assert!(text.contains(r#"script_duration_seconds{script="bad"} 2"#));
    }

    #[test]
    fn nothing_to_render() {
        assert!(render_measurements(&[]).unwrap().is_empty());
    }
}
