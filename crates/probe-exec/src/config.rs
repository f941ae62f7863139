use std::time::Duration;

use probe_model::ScriptSpec;

/// Interpreter used to run script command lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    pub program: String,
    /// Flag preceding the command line (`-c`, `/C`).
    pub flag: String,
}

impl Default for Shell {
    fn default() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(target_family = "windows")] {
                Self { program: "cmd".into(), flag: "/C".into() }
            } else {
                Self { program: "sh".into(), flag: "-c".into() }
            }
        }
    }
}

/// Runner settings shared by every script of a batch.
#[derive(Debug, Clone, Default)]
pub struct ExecConfig {
    pub shell: Shell,
    /// Deadline for scripts configured with `timeout: 0`.
    ///
    /// `None` (the default) lets such scripts run until they exit.
    pub default_timeout: Option<Duration>,
}

impl ExecConfig {
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn with_shell(mut self, shell: Shell) -> Self {
        self.shell = shell;
        self
    }

    /// Effective deadline for `spec`.
    pub fn deadline_for(&self, spec: &ScriptSpec) -> Option<Duration> {
        spec.deadline().or(self.default_timeout)
    }
}
