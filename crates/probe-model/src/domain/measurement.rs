use std::{sync::Arc, time::Duration};

use serde::Serialize;

use crate::{ScriptOutcome, ScriptSpec};

/// Result of one execution attempt of a script.
///
/// Holds the same `Arc` the store handed out; the spec itself is never copied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub script: Arc<ScriptSpec>,
    pub success: bool,
    /// Elapsed wall-clock time in seconds.
    pub duration: f64,
    pub outcome: ScriptOutcome,
}

impl Measurement {
    pub fn new(script: Arc<ScriptSpec>, outcome: ScriptOutcome, elapsed: Duration) -> Self {
        Self {
            script,
            success: outcome.is_success(),
            duration: elapsed.as_secs_f64(),
            outcome,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.script.name
    }
}
