use serde::{Deserialize, Serialize};

/// How a single script execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ScriptOutcome {
    /// Process exited on its own with the given status code.
    Exited { code: i32 },
    /// Process was terminated by a signal it did not get from us.
    Signaled,
    /// Deadline expired; the process was killed.
    TimedOut,
    /// Interpreter could not be started.
    SpawnFailed,
    /// Process could not be observed to completion (wait failed, or the task driving it died).
    Lost,
}

impl ScriptOutcome {
    /// Only a clean `0` exit counts as success.
    pub fn is_success(&self) -> bool {
        matches!(self, ScriptOutcome::Exited { code: 0 })
    }

    /// Short symbolic name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptOutcome::Exited { code: 0 } => "ok",
            ScriptOutcome::Exited { .. } => "exit",
            ScriptOutcome::Signaled => "signaled",
            ScriptOutcome::TimedOut => "timeout",
            ScriptOutcome::SpawnFailed => "spawn_failed",
            ScriptOutcome::Lost => "lost",
        }
    }
}
